use color_eyre::eyre::Result;
use colored::Colorize;
use pacman_minimax::search::Strategy;
use tracing::{debug, warn};

use super::{format_route, SearchArgs};

/// Runs every search strategy on the same board and reports how they differ
#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    #[clap(flatten)]
    search: SearchArgs,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let state = self.search.load_state()?;
        let options = self.search.agent_options()?;

        println!("{state}");
        println!(
            "Depth {} with the {} evaluation",
            options.depth, options.evaluation
        );

        let mut decisions = vec![];
        for strategy in Strategy::ALL {
            let (decision, outcome) = options
                .search_agent(strategy)
                .choose_action_with_tree(&state)?;

            println!(
                "{:>10}: {:<5} value {:<12} evaluations {:<8} expanded {:<8} cutoffs {:<6} {}",
                strategy.name(),
                decision.action.to_string(),
                decision.score.to_string(),
                decision.stats.evaluations,
                decision.stats.expanded_nodes,
                decision.stats.cutoffs,
                format_route(&outcome.result.chosen_route())
            );

            debug!(
                strategy = strategy.name(),
                action = %decision.action,
                evaluations = decision.stats.evaluations,
                "strategy finished"
            );
            decisions.push((strategy, decision));
        }

        let find = |wanted: Strategy| {
            decisions
                .iter()
                .find(|(strategy, _)| *strategy == wanted)
                .map(|(_, d)| d)
        };

        if let (Some(minimax), Some(alpha_beta)) =
            (find(Strategy::Minimax), find(Strategy::AlphaBeta))
        {
            if minimax.action == alpha_beta.action && minimax.score == alpha_beta.score {
                let saved = minimax
                    .stats
                    .evaluations
                    .saturating_sub(alpha_beta.stats.evaluations);
                println!(
                    "{}",
                    format!("Alpha-beta agrees with minimax and skipped {saved} evaluations")
                        .green()
                );
            } else {
                warn!(
                    minimax = %minimax.action,
                    alpha_beta = %alpha_beta.action,
                    "alpha-beta disagrees with minimax"
                );
                println!("{}", "Alpha-beta disagrees with minimax!".red());
            }
        }

        Ok(())
    }
}
