use std::io::{self, BufRead, Write};

use taskdeck::screens::{self, Nav, Ui};
use taskdeck::{ApiClient, Config, SessionStore};

/// Terminal implementation of the `Ui` seam: prompts on stdout, reads lines
/// from stdin.
struct TerminalUi {
    stdin: io::BufReader<io::Stdin>,
}

impl TerminalUi {
    fn new() -> Self {
        Self {
            stdin: io::BufReader::new(io::stdin()),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.stdin.read_line(&mut line) {
            Ok(0) => None, // EOF
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                log::error!("stdin read failed: {}", err);
                None
            }
        }
    }
}

impl Ui for TerminalUi {
    fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{}> ", label);
        let _ = io::stdout().flush();
        self.read_line()
    }

    fn confirm(&mut self, question: &str) -> bool {
        print!("{} [y/N]> ", question);
        let _ = io::stdout().flush();
        matches!(self.read_line().as_deref(), Some("y") | Some("Y"))
    }

    fn field_error(&mut self, field: &str, message: &str) {
        println!("  {}: {}", field, message);
    }

    fn alert(&mut self, message: &str) {
        println!("! {}", message);
    }

    fn show(&mut self, content: &str) {
        println!("{}", content);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!("using API at {}", config.api_base_url);

    let session = SessionStore::new(config.session_file.clone());
    let api = ApiClient::new(config.api_base_url.clone(), session);
    let mut ui = TerminalUi::new();

    // An existing session goes straight to the dashboard; a stale token will
    // bounce back to login through the first 401.
    let mut nav = if api.session().token().is_some() {
        Nav::Dashboard
    } else {
        Nav::Login
    };

    loop {
        nav = match nav {
            Nav::Login => screens::auth::run(&api, &mut ui).await,
            Nav::Dashboard => screens::dashboard::run(&api, &mut ui).await,
            Nav::BoardEdit(board_id) => screens::board_edit::run(&api, &mut ui, board_id).await,
            Nav::Profile => screens::profile::run(&api, &mut ui).await,
            Nav::Quit => break,
        };
    }
}
