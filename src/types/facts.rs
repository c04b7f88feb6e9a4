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

//! Raw facts gathered from the API server, reduced to the fields the engine reads.

use crate::types::error::{Error, InvalidQuantitySnafu, MissingFieldSnafu};
use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::api::storage::v1 as storagev1;
use kube::ResourceExt;
use snafu::OptionExt;
use strum::Display;

const DEFAULT_STORAGE_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

/// One snapshot of everything the fingerprint is derived from.
#[derive(Clone, Debug, Default)]
pub struct RawClusterFacts {
    pub nodes: Vec<NodeFacts>,
    pub pods: Vec<PodFacts>,
    pub namespaces: Vec<NamespaceFacts>,
    pub service_count: usize,
    /// Port exposed by the `default/kubernetes` endpoint object.
    pub default_service_endpoint_port: i32,
    pub storage_classes: Vec<StorageClassFacts>,
    pub ingress_signals: IngressSignals,
    /// `gitVersion` of the API server, e.g. `v1.28.2+k3s1`.
    pub version_string: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFacts {
    pub name: String,
    pub creation_timestamp: DateTime<Utc>,
    pub pod_capacity: u64,
    pub container_runtime_version: String,
    pub os_image: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    /// Maps `status.phase`; anything absent or unrecognised is `Unknown`.
    pub fn from_status(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => PodPhase::Pending,
            Some("Running") => PodPhase::Running,
            Some("Succeeded") => PodPhase::Succeeded,
            Some("Failed") => PodPhase::Failed,
            _ => PodPhase::Unknown,
        }
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, PodPhase::Running | PodPhase::Succeeded)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PodFacts {
    pub namespace: String,
    pub phase: PodPhase,
    /// Images in pod spec order: init containers first, then regular containers.
    pub container_images: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamespaceFacts {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorageClassFacts {
    pub name: String,
    pub is_default: bool,
}

/// Raw response bodies scanned for marker substrings.
#[derive(Clone, Debug, Default)]
pub struct IngressSignals {
    pub crd_body_text: String,
    pub ingress_class_body_text: String,
}

impl TryFrom<&corev1::Node> for NodeFacts {
    type Error = Error;

    fn try_from(node: &corev1::Node) -> Result<Self, Self::Error> {
        let name = node.name_any();

        let creation_timestamp = node
            .metadata
            .creation_timestamp
            .as_ref()
            .map(|ts| ts.0)
            .context(MissingFieldSnafu {
                kind: "node",
                name: name.clone(),
                field: "metadata.creationTimestamp",
            })?;

        let status = node.status.as_ref();

        let pod_capacity = match status
            .and_then(|s| s.capacity.as_ref())
            .and_then(|c| c.get("pods"))
        {
            Some(quantity) => parse_quantity(&quantity.0).context(InvalidQuantitySnafu {
                node: name.clone(),
                value: quantity.0.clone(),
            })?,
            None => 0,
        };

        let (container_runtime_version, os_image) = status
            .and_then(|s| s.node_info.as_ref())
            .map(|info| (info.container_runtime_version.clone(), info.os_image.clone()))
            .unwrap_or_default();

        Ok(NodeFacts {
            name,
            creation_timestamp,
            pod_capacity,
            container_runtime_version,
            os_image,
        })
    }
}

/// Integer value of a resource quantity such as `110`, `1k`, `2Ki` or `1e3`.
/// Fractions round up. Negative or malformed input gives `None`.
fn parse_quantity(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);
    let number: f64 = number.parse().ok()?;

    let multiplier = match suffix {
        "" => 1.0,
        "n" => 1e-9,
        "u" => 1e-6,
        "m" => 1e-3,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        "Ki" => 1024f64,
        "Mi" => 1024f64.powi(2),
        "Gi" => 1024f64.powi(3),
        "Ti" => 1024f64.powi(4),
        "Pi" => 1024f64.powi(5),
        "Ei" => 1024f64.powi(6),
        exp if exp.starts_with(['e', 'E']) => 10f64.powi(exp[1..].parse::<i32>().ok()?),
        _ => return None,
    };

    let value = (number * multiplier).ceil();
    (value.is_finite() && value <= u64::MAX as f64).then_some(value as u64)
}

impl From<&corev1::Pod> for PodFacts {
    fn from(pod: &corev1::Pod) -> Self {
        let container_images = pod
            .spec
            .as_ref()
            .map(|spec| {
                spec.init_containers
                    .iter()
                    .flatten()
                    .chain(spec.containers.iter())
                    .filter_map(|c| c.image.clone())
                    .collect()
            })
            .unwrap_or_default();

        PodFacts {
            namespace: pod.namespace().unwrap_or_default(),
            phase: PodPhase::from_status(pod.status.as_ref().and_then(|s| s.phase.as_deref())),
            container_images,
        }
    }
}

impl From<&corev1::Namespace> for NamespaceFacts {
    fn from(ns: &corev1::Namespace) -> Self {
        NamespaceFacts { name: ns.name_any() }
    }
}

impl From<&storagev1::StorageClass> for StorageClassFacts {
    fn from(sc: &storagev1::StorageClass) -> Self {
        let is_default = sc
            .annotations()
            .get(DEFAULT_STORAGE_CLASS_ANNOTATION)
            .is_some_and(|v| v == "true");

        StorageClassFacts {
            name: sc.name_any(),
            is_default,
        }
    }
}

/// Port of the built-in API server endpoint. The last port listed wins; 0 when none.
pub fn endpoint_port(endpoints: &corev1::Endpoints) -> i32 {
    endpoints
        .subsets
        .iter()
        .flatten()
        .flat_map(|subset| subset.ports.iter().flatten())
        .map(|port| port.port)
        .last()
        .unwrap_or(0)
}
