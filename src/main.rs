use std::{env, process::ExitCode};

use ovsdb_topology::{ClientConfig, OvsClient, StaticTransport, logging};
use tracing::error;

fn main() -> ExitCode {
    logging::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: ovsdb-topology <dump.json>");
        return ExitCode::FAILURE;
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "couldn't start runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async {
        let transport = StaticTransport::from_file(&path)
            .await
            .map_err(|e| format!("couldn't load dump '{path}': {e}"))?;
        let client = OvsClient::new(transport, ClientConfig::from_env());
        let owners = client
            .resolve_interface_ownership()
            .await
            .map_err(|e| e.to_string())?;
        serde_json::to_string_pretty(&owners).map_err(|e| e.to_string())
    });

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
