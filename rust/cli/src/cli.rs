use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em simulation core: deal, rank and play hands"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand (hole cards and a full board) and show the best hands
    Deal {
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Rank five to seven cards, e.g. `holdem rank As Ks Qs Js Ts`
    Rank {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Play hands with a placeholder policy in every seat
    Play {
        #[arg(long, default_value_t = 1)]
        hands: u32,
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        policy: Option<String>,
        /// Append JSONL hand records to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
