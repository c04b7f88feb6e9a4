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

use crate::types::facts::NodeFacts;
use crate::types::fingerprint::Distro;
use tracing::debug;

/// MicroK8s serves its API on 16443 rather than 6443.
pub const MICROK8S_API_PORT: i32 = 16443;

/// Classify the distribution. First match wins:
/// 1. version string mentions `k3s`
/// 2. the `default/kubernetes` endpoint listens on the MicroK8s port
/// 3. any node runs a Talos OS image
/// 4. otherwise vanilla Kubernetes
///
/// The order is a heuristic: a MicroK8s build whose version string contained
/// `k3s` would be reported as K3s.
pub fn classify(version_string: &str, endpoint_port: i32, nodes: &[NodeFacts]) -> Distro {
    let distro = if version_string.contains("k3s") {
        Distro::K3s
    } else if endpoint_port == MICROK8S_API_PORT {
        Distro::MicroK8s
    } else if nodes.iter().any(|n| n.os_image.contains("Talos")) {
        Distro::Talos
    } else {
        Distro::K8s
    };

    debug!(%distro, version_string, endpoint_port, "classified distribution");
    distro
}
