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

use serde::{Serialize, Serializer};
use std::fmt;
use strum::Display;

/// The classified identity of one cluster snapshot.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterFingerprint {
    #[serde(serialize_with = "as_display")]
    pub distro: Distro,
    pub server_version: String,
    pub node_count: usize,
    /// Sum of the pod capacity advertised by every node.
    pub max_pod_capacity: u64,
    pub pod_count: usize,
    /// Pods in neither `Running` nor `Succeeded`.
    pub unhealthy_pod_count: usize,
    pub namespace_count: usize,
    pub service_count: usize,
    /// Runtime of the first listed node only.
    pub container_runtime: String,
    #[serde(serialize_with = "as_display")]
    pub storage_solution: StorageSolution,
    #[serde(serialize_with = "as_display")]
    pub gitops_tool: GitopsTool,
    #[serde(serialize_with = "as_display")]
    pub cni: Cni,
    pub ingress: IngressSet,
    pub cluster_age_days: u64,
}

fn as_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Distribution names double as the ASCII art asset keys.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Distro {
    #[strum(to_string = "K8s")]
    #[default]
    K8s,

    #[strum(to_string = "K3s")]
    K3s,

    #[strum(to_string = "MicroK8s")]
    MicroK8s,

    #[strum(to_string = "Talos")]
    Talos,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Cni {
    #[strum(to_string = "Cilium")]
    Cilium,

    #[strum(to_string = "Calico")]
    Calico,

    #[strum(to_string = "Weave Net")]
    WeaveNet,

    #[strum(to_string = "Flannel")]
    Flannel,

    #[strum(to_string = "Unknown")]
    #[default]
    Unknown,
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub enum StorageSolution {
    #[default]
    None,
    Longhorn,
    RookCeph,
    /// An unrecognised default StorageClass, reported by name.
    Detected { name: String },
}

impl fmt::Display for StorageSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageSolution::None => f.write_str("No Storage detected"),
            StorageSolution::Longhorn => f.write_str("Longhorn"),
            StorageSolution::RookCeph => f.write_str("Rook/Ceph"),
            StorageSolution::Detected { name } => f.write_str(name),
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum GitopsTool {
    #[strum(to_string = "No GitOps tool used")]
    #[default]
    None,

    #[strum(to_string = "Flux")]
    Flux,

    #[strum(to_string = "Argo CD")]
    ArgoCD,

    #[strum(to_string = "Argo CD + Flux")]
    FluxAndArgoCD,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum IngressController {
    #[strum(to_string = "Traefik")]
    Traefik,

    #[strum(to_string = "Nginx")]
    Nginx,
}

/// Detected ingress controllers in detection order, without duplicates.
///
/// Renders as a comma separated list; an empty set renders as an empty string.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct IngressSet(Vec<IngressController>);

impl IngressSet {
    pub fn insert(&mut self, controller: IngressController) {
        if !self.0.contains(&controller) {
            self.0.push(controller);
        }
    }

    pub fn contains(&self, controller: IngressController) -> bool {
        self.0.contains(&controller)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IngressSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, controller) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", controller)?;
        }
        Ok(())
    }
}

impl Serialize for IngressSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|c| c.to_string()))
    }
}
