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

use clap::Parser;
use kubefetch::render::OutputFormat;
use kubefetch::{Options, run};
use shadow_rs::shadow;
use std::io::IsTerminal;

shadow!(build);

#[derive(Parser, Debug)]
#[command(name = "kubefetch")]
#[command(about = "Show what a Kubernetes cluster is made of", long_about = None)]
#[command(version = build::PKG_VERSION, long_version = build::CLAP_LONG_VERSION)]
struct Cli {
    /// kubeconfig context to use instead of the current one
    #[arg(long, env = "KUBEFETCH_CONTEXT")]
    context: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, env = "KUBEFETCH_OUTPUT", default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    no_color: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let options = Options {
        context: cli.context,
        output: cli.output,
        color: !cli.no_color && std::io::stdout().is_terminal(),
        verbose: cli.verbose,
    };

    if let Err(e) = run(options).await {
        eprintln!("kubefetch: {}", e);
        std::process::exit(1);
    }
}
