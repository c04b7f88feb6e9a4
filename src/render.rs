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

use crate::types::fingerprint::{ClusterFingerprint, Distro};
use clap::ValueEnum;
use snafu::{ResultExt, Snafu};
use strum::Display;

const K8S_ART: &str = include_str!("../assets/K8s");
const K3S_ART: &str = include_str!("../assets/K3s");
const MICROK8S_ART: &str = include_str!("../assets/MicroK8s");
const TALOS_ART: &str = include_str!("../assets/Talos");

const RESET: &str = "\x1b[0m";

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("failed to encode fingerprint as JSON: {}", source))]
    Json { source: serde_json::Error },

    #[snafu(display("failed to encode fingerprint as YAML: {}", source))]
    Yaml { source: serde_yaml_ng::Error },
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display)]
pub enum OutputFormat {
    /// ASCII art next to labelled fields
    #[default]
    #[strum(to_string = "text")]
    Text,

    #[strum(to_string = "json")]
    Json,

    #[strum(to_string = "yaml")]
    Yaml,
}

pub fn render(
    fingerprint: &ClusterFingerprint,
    format: OutputFormat,
    color: bool,
) -> Result<String, Error> {
    match format {
        OutputFormat::Text => Ok(render_text(fingerprint, color)),
        OutputFormat::Json => serde_json::to_string_pretty(fingerprint)
            .map(|s| s + "\n")
            .context(JsonSnafu),
        OutputFormat::Yaml => serde_yaml_ng::to_string(fingerprint).context(YamlSnafu),
    }
}

pub fn art(distro: Distro) -> &'static str {
    match distro {
        Distro::K8s => K8S_ART,
        Distro::K3s => K3S_ART,
        Distro::MicroK8s => MICROK8S_ART,
        Distro::Talos => TALOS_ART,
    }
}

/// Brand color of each distribution as an RGB triple.
pub fn distro_color(distro: Distro) -> (u8, u8, u8) {
    match distro {
        Distro::MicroK8s => (233, 84, 32),
        Distro::K3s => (255, 198, 28),
        Distro::Talos => (249, 42, 32),
        Distro::K8s => (50, 108, 229),
    }
}

fn fields(fp: &ClusterFingerprint) -> Vec<(&'static str, String)> {
    vec![
        ("Distro", fp.distro.to_string()),
        ("Version", fp.server_version.clone()),
        ("Node Count", fp.node_count.to_string()),
        (
            "Pod Count",
            format!("{}/{}", fp.pod_count, fp.max_pod_capacity),
        ),
        ("Unhealthy Pods", fp.unhealthy_pod_count.to_string()),
        ("Namespace Count", fp.namespace_count.to_string()),
        ("Service Count", fp.service_count.to_string()),
        ("Container Runtime Interface", fp.container_runtime.clone()),
        ("CNI", fp.cni.to_string()),
        ("Storage", fp.storage_solution.to_string()),
        ("Ingress", fp.ingress.to_string()),
        ("GitOps Tool", fp.gitops_tool.to_string()),
        ("Cluster Age", format!("{}d", fp.cluster_age_days)),
    ]
}

/// Interleave the distro's art with one labelled field per line.
pub fn render_text(fp: &ClusterFingerprint, color: bool) -> String {
    let (color_code, reset) = if color {
        let (r, g, b) = distro_color(fp.distro);
        (format!("\x1b[38;2;{};{};{}m", r, g, b), RESET)
    } else {
        (String::new(), "")
    };

    let art_lines: Vec<&str> = art(fp.distro).trim_matches('\n').lines().collect();
    let width = art_lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let fields = fields(fp);

    let mut out = String::new();
    for i in 0..art_lines.len().max(fields.len()) {
        let art_line = art_lines.get(i).copied().unwrap_or("");
        match fields.get(i) {
            Some((label, value)) => out.push_str(&format!(
                "{:<width$} {}    {}: {}{}\n",
                art_line, color_code, label, reset, value
            )),
            None => {
                out.push_str(art_line);
                out.push('\n');
            }
        }
    }
    out
}
