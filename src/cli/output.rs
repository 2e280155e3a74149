use std::time::Duration;

use colored::Colorize;

use crate::wizard::{FieldId, Notice, NoticeSeverity};

pub fn section(title: &str) {
    println!();
    println!("{}", format!("=== {} ===", title.trim()).bold());
}

pub fn info(message: &str) {
    println!("{} {}", "[i]".cyan(), message);
}

pub fn success(message: &str) {
    println!("{} {}", "[✓]".green(), message.green());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "[x]".red(), message.red());
}

pub fn field_error(field: FieldId, message: &str) {
    println!("{} {}: {}", "[!]".yellow(), field_label(field).bold(), message.red());
}

/// Prints a transient notice. A terminal cannot time-dismiss, so extended
/// notices spell the wait out instead.
pub fn notice(notice: &Notice, visible_for: Duration) {
    match notice.severity {
        NoticeSeverity::Info => info(&notice.message),
        NoticeSeverity::Success => success(&notice.message),
        NoticeSeverity::Error => {
            error(&notice.message);
            if notice.extended {
                info(&format!(
                    "Wait about {} seconds before retrying.",
                    visible_for.as_secs()
                ));
            }
        }
    }
}

fn field_label(field: FieldId) -> &'static str {
    match field {
        FieldId::WalletChoice => "Wallet",
        FieldId::WalletAddress => "Wallet address",
        FieldId::RecoveryPhrase => "Recovery phrase",
        FieldId::NewPassword => "New password",
        FieldId::ConfirmPassword => "Confirm password",
    }
}
