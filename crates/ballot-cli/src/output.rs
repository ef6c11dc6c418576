//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use ballot_ledger::Voter;
use ballot_types::{Address, TransactionReceipt};
use colored::Colorize;
use tabled::{Table, Tabled};

use crate::rpc_client::ProposalInfo;

/// Format address (short version).
pub fn format_address_short(addr: &str) -> String {
    if addr.len() > 12 {
        format!("{}...{}", &addr[..10], &addr[addr.len() - 8..])
    } else {
        addr.to_string()
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    println!("{}", format!("⚠ {}", msg).yellow());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Print transaction receipt.
pub fn print_transaction_receipt(receipt: &TransactionReceipt) {
    println!("{}", "Transaction Receipt".bold());
    println!("{}", "=".repeat(50));
    println!(
        "Transaction Hash: {}",
        receipt.transaction_hash.to_string().bright_cyan()
    );
    println!(
        "Block Number:     {}",
        receipt.block_number.to_string().bright_green()
    );
    println!("From:             {}", receipt.from);
    if let Some(to) = receipt.to {
        println!("Ledger:           {}", to);
    }
    if let Some(created) = receipt.ledger_address {
        println!("Deployed Ledger:  {}", created.to_string().bright_magenta());
    }
    let status = if receipt.status {
        "Success".green()
    } else {
        "Failed".red()
    };
    println!("Status:           {}", status);

    for log in &receipt.logs {
        let params: Vec<String> = log
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        println!("  {} {}", log.event.bright_yellow(), params.join(" "));
    }
}

#[derive(Tabled)]
struct ProposalRow {
    #[tabled(rename = "#")]
    index: usize,
    name: String,
    votes: u64,
    #[tabled(rename = "")]
    leader: String,
}

/// Render proposals as a table, marking the winning index.
pub fn proposals_table(proposals: &[ProposalInfo], winner: Option<u32>) -> String {
    let rows: Vec<ProposalRow> = proposals
        .iter()
        .enumerate()
        .map(|(index, p)| ProposalRow {
            index,
            name: p.name.clone(),
            votes: p.vote_count,
            leader: if winner == Some(index as u32) {
                "leading".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    Table::new(rows).to_string()
}

/// Print voter state.
pub fn print_voter(address: &Address, voter: &Voter) {
    println!("{}", "Voter".bold());
    println!("{}", "=".repeat(50));
    println!("Address:  {}", address.to_string().bright_cyan());
    println!("Weight:   {}", voter.weight.to_string().bright_green());
    println!("Voted:    {}", voter.voted);
    match voter.delegate {
        Some(delegate) => println!("Delegate: {}", delegate),
        None if voter.voted => println!("Vote:     {}", voter.vote),
        None => {}
    }
}
