pub mod choose;
pub mod compare;

use std::{fs, path::PathBuf};

use choose::Choose;
use compare::Compare;

use clap::Subcommand;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use pacman_minimax::types::AgentIndex;
use pacman_rs::{AgentOptions, Direction, GameState};
use tracing::info;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    Choose(Choose),
    Compare(Compare),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Choose(c) => c.run()?,
            Command::Compare(c) => c.run()?,
        }

        Ok(())
    }
}

/// The library reports errors with anyhow, keep the whole chain when moving them over to eyre
fn from_anyhow(err: anyhow::Error) -> Report {
    eyre!("{err:#}")
}

#[derive(clap::Args, Debug)]
pub(crate) struct SearchArgs {
    /// Layout file to start from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Agent options, like `depth=3,evalFn=better`
    #[clap(short = 'a', long, value_parser, default_value = "")]
    agent_args: String,

    /// Search depth, wins over the depth in --agent-args
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// Evaluation function (score or better), wins over the one in --agent-args
    #[clap(short, long, value_parser)]
    eval_fn: Option<String>,
}

impl SearchArgs {
    fn load_state(&self) -> Result<GameState> {
        let contents = fs::read_to_string(&self.layout)
            .wrap_err_with(|| format!("Could not read layout {}", self.layout.display()))?;

        let state: GameState = contents
            .parse()
            .map_err(from_anyhow)
            .wrap_err_with(|| format!("Could not parse layout {}", self.layout.display()))?;
        info!(layout = %self.layout.display(), "loaded layout");

        Ok(state)
    }

    fn agent_options(&self) -> Result<AgentOptions> {
        let mut options: AgentOptions = self.agent_args.parse().map_err(from_anyhow)?;

        if let Some(depth) = self.depth {
            options.depth = depth;
        }
        if let Some(eval_fn) = &self.eval_fn {
            options.evaluation = eval_fn.parse().map_err(from_anyhow)?;
        }

        Ok(options)
    }
}

fn format_route(route: &[(AgentIndex, Direction)]) -> String {
    route
        .iter()
        .map(|(agent, action)| format!("{agent}:{action}"))
        .join(" ")
}
