pub mod ovsdb_parser;
