// Copyright 2025 The kubefetch Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::context::Context;
use crate::render::OutputFormat;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod context;
pub mod engine;
pub mod render;
pub mod types;


/// Per-invocation settings, filled in from the command line.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// kubeconfig context to use instead of the current one
    pub context: Option<String>,
    pub output: OutputFormat,
    pub color: bool,
    pub verbose: bool,
}

pub async fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(options.verbose);
    debug!(?options, "starting");

    let ctx = Context::connect(options.context.as_deref()).await?;
    let facts = ctx.collect().await?;
    let fingerprint = engine::fingerprint(&facts, chrono::Utc::now())?;
    let output = render::render(&fingerprint, options.output, options.color)?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.flush().await?;

    Ok(())
}

// Logs go to stderr so the report on stdout stays machine readable.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,kubefetch=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}
