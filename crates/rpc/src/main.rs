//! RefNet CLI - Main entry point

use clap::{Parser, Subcommand};
use refnet_core::{Amount, Asset};
use refnet_referral::DEFAULT_BASE_URL;
use refnet_rpc::{commands, AppContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refnet")]
#[command(about = "RefNet - Referral platform fee engine", long_about = None)]
struct Cli {
    /// Engine configuration (JSON); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported assets with minimums and fees
    Assets,

    /// List membership packages
    Packages,

    /// Evaluate a deposit
    Deposit {
        /// Amount as entered
        amount: String,
        /// Asset symbol
        asset: Asset,
    },

    /// Evaluate a withdrawal
    Withdraw {
        /// Amount as entered
        amount: String,
        /// Asset symbol
        asset: Asset,
        /// Available balance snapshot
        #[arg(long)]
        balance: Amount,
        /// Destination address
        #[arg(long, default_value = "")]
        to: String,
    },

    /// Evaluate a package purchase
    Buy {
        /// Package id
        package: u32,
        /// Asset to pay with
        asset: Asset,
        /// Referral code of the inviter
        #[arg(long)]
        referrer: Option<String>,
        /// Amount the buyer intends to send (defaults to the listed price)
        #[arg(long)]
        amount: Option<String>,
    },

    /// Print a referral link
    ReferralLink {
        /// Existing code; a new one is generated when omitted
        code: Option<String>,
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Build the backend payload for a withdrawal
    PayloadWithdraw {
        amount: String,
        asset: Asset,
        #[arg(long)]
        balance: Amount,
        /// Destination address
        #[arg(long)]
        to: String,
        /// User wallet the withdrawal is debited from
        #[arg(long)]
        from: String,
    },

    /// Build the backend payload for a package purchase
    PayloadBuy {
        package: u32,
        asset: Asset,
        /// Buyer wallet
        #[arg(long)]
        wallet: String,
        #[arg(long)]
        referrer: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref(), cli.json)?;

    let output = match cli.command {
        Commands::Assets => commands::assets(&ctx)?,
        Commands::Packages => commands::packages(&ctx)?,
        Commands::Deposit { amount, asset } => commands::deposit(&ctx, asset, &amount)?,
        Commands::Withdraw {
            amount,
            asset,
            balance,
            to,
        } => commands::withdraw(&ctx, asset, &amount, balance, &to)?,
        Commands::Buy {
            package,
            asset,
            referrer,
            amount,
        } => commands::buy(&ctx, package, asset, referrer, amount.as_deref())?,
        Commands::ReferralLink { code, base_url } => {
            commands::referral_link(code.as_deref(), &base_url)?
        }
        Commands::PayloadWithdraw {
            amount,
            asset,
            balance,
            to,
            from,
        } => commands::payload_withdraw(&ctx, asset, &amount, balance, &to, &from)?,
        Commands::PayloadBuy {
            package,
            asset,
            wallet,
            referrer,
        } => commands::payload_buy(&ctx, package, asset, &wallet, referrer)?,
    };

    println!("{output}");
    Ok(())
}
