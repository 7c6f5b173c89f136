use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::page::{AuthForm, PageNavigator};
use crate::wallet::status::short_address;
use crate::wallet::WalletHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Connect,
    Mint,
    Page(String),
    ShowSignup,
    ShowLogin,
    Login,
    Signup,
    UpdatePassword,
    SaveNotes,
    Send(String),
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let word = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    let cmd = match word {
        "connect" => ConsoleCommand::Connect,
        "mint" => ConsoleCommand::Mint,
        "page" if !rest.is_empty() => ConsoleCommand::Page(rest.to_string()),
        "page" => return Err("usage: page <id>".to_string()),
        "show-signup" => ConsoleCommand::ShowSignup,
        "show-login" => ConsoleCommand::ShowLogin,
        "login" => ConsoleCommand::Login,
        "signup" => ConsoleCommand::Signup,
        "password" => ConsoleCommand::UpdatePassword,
        "notes" => ConsoleCommand::SaveNotes,
        "send" => ConsoleCommand::Send(rest.to_string()),
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(cmd)
}

fn help_text(nav: &PageNavigator) -> String {
    [
        "Commands:".to_string(),
        "  connect            Connect your wallet".to_string(),
        "  mint               Mint the 'First Step' badge".to_string(),
        format!("  page <id>          Switch page ({})", nav.pages().join(", ")),
        "  show-signup        Show the signup form".to_string(),
        "  show-login         Show the login form".to_string(),
        "  login              Submit the login form".to_string(),
        "  signup             Submit the signup form".to_string(),
        "  password           Update your password".to_string(),
        "  notes              Save your notes".to_string(),
        "  send <msg>         Send a chat message".to_string(),
        "  status             Show wallet and page status".to_string(),
        "  help               Show this list".to_string(),
        "  quit               Exit".to_string(),
    ]
    .join("\n")
}

fn print_help(nav: &PageNavigator) {
    println!("{}", help_text(nav));
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_console(wallet: WalletHandle, mut nav: PageNavigator) {
    println!("========================================");
    println!("         HEALING BADGE PORTAL           ");
    println!("========================================");
    print_help(&nav);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match cmd {
            // Failures were already alerted by the bridge
            ConsoleCommand::Connect => {
                if let Err(e) = wallet.connect().await {
                    debug!("Connect failed: {}", e);
                }
            }
            ConsoleCommand::Mint => {
                if let Err(e) = wallet.mint().await {
                    debug!("Mint failed: {}", e);
                }
            }
            ConsoleCommand::Page(id) => {
                if nav.show_page(&id) {
                    println!("📄 {}", id);
                } else {
                    println!("No page named '{}'", id);
                }
            }
            ConsoleCommand::ShowSignup => nav.show_signup(),
            ConsoleCommand::ShowLogin => nav.show_login(),
            ConsoleCommand::Login => info!("Login attempt"),
            ConsoleCommand::Signup => info!("Signup attempt"),
            ConsoleCommand::UpdatePassword => info!("Updating password"),
            ConsoleCommand::SaveNotes => info!("Saving notes"),
            ConsoleCommand::Send(msg) => info!("Sending message: {}", msg),
            ConsoleCommand::Status => {
                match wallet.address().await {
                    Ok(Some(addr)) => println!("Wallet: Connected: {}", short_address(&addr)),
                    Ok(None) => println!("Wallet: not connected"),
                    Err(e) => println!("Wallet: {}", e),
                }
                let form = match nav.auth_form() {
                    AuthForm::Login => "login",
                    AuthForm::Signup => "signup",
                };
                println!("Page: {} (auth form: {})", nav.active().unwrap_or("-"), form);
            }
            ConsoleCommand::Help => print_help(&nav),
            ConsoleCommand::Quit => break,
        }
    }

    println!("\nSession ended.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("connect"), Ok(ConsoleCommand::Connect));
        assert_eq!(parse_command("  mint  "), Ok(ConsoleCommand::Mint));
        assert_eq!(
            parse_command("page badges"),
            Ok(ConsoleCommand::Page("badges".to_string()))
        );
        assert_eq!(
            parse_command("send hello there"),
            Ok(ConsoleCommand::Send("hello there".to_string()))
        );
        assert_eq!(parse_command("exit"), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("page").is_err());
        assert!(parse_command("dance").unwrap_err().contains("dance"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text(&PageNavigator::default());
        for line in help.lines().skip(1) {
            let word = line.split_whitespace().next().unwrap();
            let input = if word == "page" { "page home" } else { word };
            assert!(parse_command(input).is_ok(), "help lists unknown '{}'", word);
        }
        for word in [
            "connect", "mint", "page", "show-signup", "show-login", "login", "signup", "password",
            "notes", "send", "status", "help", "quit",
        ] {
            assert!(
                help.lines().any(|l| l.split_whitespace().next() == Some(word)),
                "help is missing '{}'",
                word
            );
        }
    }
}
