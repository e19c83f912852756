use clap::{Arg, Command}; // Command-line argument parsing
use std::path::Path;
use std::process;

use gatewarden::auth::verification::hash_password;
use gatewarden::service::reauth::{reauthenticate, ReauthRequest};
use gatewarden::service::signin::{sign_in, SignInRequest};
use gatewarden::store::FileStore;
use gatewarden::utils::io::prompt_password;
use gatewarden::utils::logging::initialize_logging;
use gatewarden::{AuthConfig, CONFIG_FILE, STORE_FILE};

fn main() {
    // Set up logging before anything else so every outcome lands in the log
    if let Err(e) = initialize_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    // Configuration is read once and treated as immutable from here on
    let config = AuthConfig::load(Path::new(CONFIG_FILE));

    // The file-backed store stands in for the external record service
    let store = FileStore::open(Path::new(STORE_FILE))
        .with_table(&config.users_table, &config.users_key_column)
        .with_table(&config.tokens_table, &config.tokens_key_column);

    // Define the command-line interface using clap
    let matches = Command::new("gatewarden")
        .about("Password sign-in and session token authorization")
        .subcommand(
            Command::new("signin")
                .about("Verify a password and issue a session token")
                .arg(
                    Arg::new("username")
                        .help("The identifier to sign in as")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("reauth")
                .about("Check a previously issued session token")
                .arg(
                    Arg::new("username")
                        .help("The identifier the token was issued to")
                        .required(true),
                )
                .arg(Arg::new("token").help("The token to check").required(true)),
        )
        .subcommand(
            Command::new("hash")
                .about("Compute the salted digest an identity record stores")
                .arg(
                    Arg::new("salt")
                        .help("The salt stored on the identity record")
                        .required(true),
                ),
        )
        .get_matches();

    // Handle the "signin" subcommand
    if let Some(sub_matches) = matches.subcommand_matches("signin") {
        let username = sub_matches.get_one::<String>("username").unwrap(); // Required by clap
        let password = read_password_or_exit("Please enter your password:");

        let request = SignInRequest {
            username: username.clone(),
            password,
        };
        match sign_in(&store, &config, &request) {
            Ok(response) => print_response(&response),
            Err(e) => {
                eprintln!("Sign in could not be completed: {}", e);
                process::exit(1);
            }
        }
    }

    // Handle the "reauth" subcommand
    if let Some(sub_matches) = matches.subcommand_matches("reauth") {
        let username = sub_matches.get_one::<String>("username").unwrap();
        let token = sub_matches.get_one::<String>("token").unwrap();

        let request = ReauthRequest {
            username: Some(username.clone()),
            token: Some(token.clone()),
        };
        match reauthenticate(&store, &config, &request) {
            Ok(response) => print_response(&response),
            Err(e) => {
                eprintln!("Authorization could not be completed: {}", e);
                process::exit(1);
            }
        }
    }

    // Handle the "hash" subcommand: an operator aid for building identity
    // records outside this tool
    if let Some(sub_matches) = matches.subcommand_matches("hash") {
        let salt = sub_matches.get_one::<String>("salt").unwrap();
        let password = read_password_or_exit("Please enter the password to hash:");
        println!("{}", hash_password(salt, &password));
    }
}

/// Read a password off the terminal, exiting on input failure
fn read_password_or_exit(prompt: &str) -> String {
    match prompt_password(prompt) {
        Ok(password) => password,
        Err(e) => {
            eprintln!("Failed to read password: {}", e);
            process::exit(1);
        }
    }
}

/// Print an operation response to stdout as JSON, the same shape a gateway
/// would relay
fn print_response<T: serde::Serialize>(response: &T) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to format response: {}", e);
            process::exit(1);
        }
    }
}
