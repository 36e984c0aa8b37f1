//! Card Authorizer CLI
//!
//! Reads one JSON command per line and writes one JSON response per line.
//!
//! # Usage
//!
//! ```bash
//! cargo run < operations > responses
//! cargo run -- operations.jsonl > responses
//! cargo run -- --log-level debug --log-file authorizer.log operations.jsonl
//! cargo run -- --window-secs 60 --max-in-window 3 operations.jsonl
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input file not readable, output not writable, logging setup failed)

use card_authorizer::core::{AuthorizationService, InMemoryStore};
use card_authorizer::{cli, dispatcher, logging};
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(&args.to_log_config()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let mut service =
        AuthorizationService::with_rules(InMemoryStore::new(), args.to_rule_config());

    let result = dispatcher::open_input(args.input_file.as_deref()).and_then(|input| {
        let mut output = io::stdout().lock();
        dispatcher::execute(&mut service, input, &mut output)
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "authorizer stopped");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
