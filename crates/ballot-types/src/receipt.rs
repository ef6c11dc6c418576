use crate::address::Address;
use crate::hash::Hash;

/// Result of executing an accepted transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TransactionReceipt {
    /// Hash of the transaction
    pub transaction_hash: Hash,
    /// Position of the transaction in the host's total order
    pub block_number: u64,
    /// Address of the sender
    pub from: Address,
    /// Target ledger (None for deployment)
    pub to: Option<Address>,
    /// Address of the created ledger (deployment only)
    pub ledger_address: Option<Address>,
    /// Whether the transaction succeeded
    pub status: bool,
    /// Events emitted during execution
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn new(transaction_hash: Hash, block_number: u64, from: Address, to: Option<Address>) -> Self {
        Self {
            transaction_hash,
            block_number,
            from,
            to,
            ledger_address: None,
            status: true,
            logs: Vec::new(),
        }
    }

    pub fn with_ledger_address(mut self, address: Address) -> Self {
        self.ledger_address = Some(address);
        self
    }

    pub fn with_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }
}

/// Event emitted by a ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Log {
    /// Ledger that emitted the event
    pub address: Address,
    /// Event name
    pub event: String,
    /// Named, display-formatted parameters
    pub params: Vec<(String, String)>,
}

impl Log {
    pub fn new(address: Address, event: impl Into<String>) -> Self {
        Self {
            address,
            event: event.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
