use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::error::Error;
use upbank::{
    AccountType, Client, ListAccountsOption, ListTagsOption, ListTransactionsOption,
    TransactionStatus,
};

#[derive(Debug, Parser)]
#[command(name = "upbank-cli", about = "CLI wrapper for the Up Bank API")]
struct Cli {
    /// API token; falls back to UP_TOKEN env var
    #[arg(long, env = "UP_TOKEN")]
    token: String,

    /// Client log level
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check the token is accepted
    Ping,
    /// List accounts
    Accounts {
        #[arg(long, value_enum)]
        kind: Option<AccountKind>,
    },
    /// List transactions
    Transactions {
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Only transactions carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// List tags
    Tags {
        #[arg(long, default_value_t = 100)]
        page_size: i64,
    },
    /// Add tags to a transaction
    Tag {
        #[arg(long, value_name = "ID")]
        transaction_id: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove tags from a transaction
    Untag {
        #[arg(long, value_name = "ID")]
        transaction_id: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AccountKind {
    Saver,
    Transactional,
    HomeLoan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Status {
    Held,
    Settled,
}

impl From<AccountKind> for AccountType {
    fn from(value: AccountKind) -> Self {
        match value {
            AccountKind::Saver => AccountType::Saver,
            AccountKind::Transactional => AccountType::Transactional,
            AccountKind::HomeLoan => AccountType::HomeLoan,
        }
    }
}

impl From<Status> for TransactionStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Held => TransactionStatus::Held,
            Status::Settled => TransactionStatus::Settled,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = Client::builder(cli.token)
        .log_level(cli.log_level)
        .build()?;

    match cli.command {
        Commands::Ping => {
            let ping = client.ping().await?;
            println!("{} {}", ping.meta.status_emoji, ping.meta.id);
        }
        Commands::Accounts { kind } => {
            let mut options = Vec::new();
            if let Some(kind) = kind {
                options.push(ListAccountsOption::AccountType(kind.into()));
            }
            for account in client.list_accounts(&options).await? {
                println!(
                    "{} | {} | {}",
                    account.display_name, account.account_type, account.balance
                );
            }
        }
        Commands::Transactions { status, tag } => {
            let mut options = Vec::new();
            if let Some(status) = status {
                options.push(ListTransactionsOption::Status(status.into()));
            }
            if let Some(tag) = tag {
                options.push(ListTransactionsOption::Tag(tag));
            }
            for txn in client.list_transactions(&options).await? {
                println!(
                    "{} | {} | {} | {}",
                    txn.created_at, txn.status, txn.amount, txn.description
                );
            }
        }
        Commands::Tags { page_size } => {
            let tags = client
                .list_tags(&[ListTagsOption::PageSize(page_size)])
                .await?;
            for (i, tag) in tags.iter().enumerate() {
                println!("{i}. {}", tag.name());
            }
        }
        Commands::Tag {
            transaction_id,
            tags,
        } => {
            client.add_tags_to_transaction(&transaction_id, &tags).await?;
            println!("Tagged {} with {}", transaction_id, tags.join(", "));
        }
        Commands::Untag {
            transaction_id,
            tags,
        } => {
            client
                .remove_tags_from_transaction(&transaction_id, &tags)
                .await?;
            println!("Removed {} from {}", tags.join(", "), transaction_id);
        }
    }

    Ok(())
}
