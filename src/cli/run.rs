//! Run command implementation

use crate::config::Config;
use crate::observation::Observation;
use crate::pipeline::{Pipeline, PipelineError};
use crate::record::{cents, Recorder};
use crate::source::Metal;
use chrono::Utc;
use clap::Args;
use std::io::{self, BufRead, Write};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Save without prompting and print nothing (for cron)
    #[arg(short, long)]
    pub quiet: bool,

    /// Use mock prices instead of the network
    #[arg(short, long)]
    pub test: bool,

    /// Save without prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let auto_save = self.quiet || self.yes;

        let result = self.run_pipeline(config, auto_save).await;
        if let Err(ref e) = result {
            let recorder = Recorder::new(config.storage.recorder_config());
            if let Err(log_err) = recorder.record_failure(Utc::now(), e) {
                tracing::warn!(error = %log_err, "Could not log failed run");
            }
        }

        Ok(result?)
    }

    async fn run_pipeline(&self, config: &Config, auto_save: bool) -> Result<(), PipelineError> {
        let mut pipeline = Pipeline::from_config(config, self.test)?;
        let observation = pipeline.run(auto_save).await?;

        if self.quiet {
            return Ok(());
        }

        print!("{}", render_table(&observation, self.test));

        if !auto_save {
            let stdin = io::stdin();
            let save = confirm(
                "Save this observation? [y/N] ",
                &mut stdin.lock(),
                &mut io::stdout(),
            )
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            });

            if !save {
                println!("Not saved.");
                return Ok(());
            }
            pipeline.persist(&observation)?;
        }

        println!(
            "Saved to {} and {}",
            pipeline.recorder().record_path().display(),
            pipeline.recorder().log_path().display()
        );
        Ok(())
    }
}

/// Console table for an observation
pub fn render_table(obs: &Observation, mock: bool) -> String {
    let mut out = format!("Metal prices at {}", obs.timestamp_iso());
    if mock {
        out.push_str(" (mock)");
    }
    out.push('\n');
    out.push_str(&format!(
        "{:<8}{:>14}{:>12}{:>16}{:>14}\n",
        "Metal", "USD/oz", "USD/g", "EGP/oz", "EGP/g"
    ));

    for metal in Metal::ALL {
        let quote = obs.quote(metal);
        out.push_str(&format!(
            "{:<8}{:>14}{:>12}{:>16}{:>14}\n",
            metal.to_string(),
            cents(quote.usd_per_ounce),
            cents(quote.usd_per_gram),
            cents(quote.egp_per_ounce),
            cents(quote.egp_per_gram),
        ));
    }

    out
}

/// Ask a yes/no question; anything but `y`/`yes` is a no
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
