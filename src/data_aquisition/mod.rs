/*
 * This module provides data aquisition abilites for the application.
 * It doesn't care what the rows mean, just how they are fetched.
 * Anything that can run a query against an OVSDB database implements `Transact`.
 */

pub mod core;
pub mod dump;
