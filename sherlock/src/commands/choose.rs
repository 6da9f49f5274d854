use std::io::{self, Write};

use color_eyre::eyre::Result;
use colored::Colorize;
use pacman_minimax::Agent;
use pacman_rs::{factory_for, BoxedAgent, MoveOutput, ReflexAgent};
use tracing::{debug, info};

use super::{format_route, from_anyhow, SearchArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Choose {
    #[clap(flatten)]
    search: SearchArgs,

    /// Agent to ask for a move: reflex, minimax, alphabeta or expectimax
    #[clap(long, value_parser, default_value = "alphabeta")]
    agent: String,

    /// Seed for agents that break ties at random
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Print the whole searched tree
    #[clap(long, value_parser)]
    tree: bool,

    /// Print the decision as JSON instead
    #[clap(long, value_parser)]
    json: bool,
}

impl Choose {
    pub(crate) fn run(self) -> Result<()> {
        let state = self.search.load_state()?;
        let options = self.search.agent_options()?;
        let factory = factory_for(&self.agent).map_err(from_anyhow)?;
        info!(
            agent = %factory.name(),
            depth = options.depth,
            evaluation = %options.evaluation,
            "choosing a move"
        );

        if !self.json {
            println!("{state}");
        }

        let output = if let Some(strategy) = factory.strategy() {
            let agent = options.search_agent(strategy);
            let (decision, outcome) = agent.choose_action_with_tree(&state)?;

            debug!(leaves = outcome.result.leaf_count(), "search finished");
            if self.tree {
                self.write_tree(
                    &outcome.result.to_text_tree(),
                    &mut io::stdout(),
                    &mut io::stderr(),
                )?;
            }
            if !self.json {
                println!(
                    "{} searched {} deep with the {} evaluation",
                    agent.name,
                    options.depth,
                    options.evaluation
                );
                println!(
                    "Principal variation: {}",
                    format_route(&outcome.result.chosen_route())
                );
            }

            MoveOutput::from_decision(agent.name, &decision)
        } else {
            let agent = match self.seed {
                Some(seed) => Box::new(ReflexAgent::seeded(seed)) as BoxedAgent,
                None => factory.create(&options),
            };
            let action = agent.get_action(&state)?;
            debug!(seed = ?self.seed, %action, "reflex agent moved");

            MoveOutput::from_action(agent.name(), action)
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Chosen move: {}", output.r#move.bold());
            if let Some(score) = output.score {
                println!("Backed up value: {score}");
            }
            if let (Some(evaluations), Some(expanded_nodes), Some(cutoffs)) =
                (output.evaluations, output.expanded_nodes, output.cutoffs)
            {
                println!(
                    "Evaluations: {evaluations}, expanded nodes: {expanded_nodes}, cutoffs: {cutoffs}"
                );
            }
        }

        Ok(())
    }

    /// With `--json` the tree goes to stderr so stdout stays a single JSON document
    fn write_tree(
        &self,
        tree: &str,
        stdout: &mut impl Write,
        stderr: &mut impl Write,
    ) -> io::Result<()> {
        match (self.tree, self.json) {
            (false, _) => Ok(()),
            (true, false) => writeln!(stdout, "{tree}"),
            (true, true) => writeln!(stderr, "{tree}"),
        }
    }
}
