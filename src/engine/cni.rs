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

use crate::types::facts::PodFacts;
use crate::types::fingerprint::{Cni, Distro};
use tracing::debug;

const KUBE_SYSTEM: &str = "kube-system";

/// Image substrings that mark a container as a network plugin.
const KNOWN_PLUGINS: [&str; 5] = ["calico", "cilium", "flannel", "weave", "kube-router"];

/// Classify the CNI from `kube-system` container images.
///
/// Every plugin image overwrites the previous result, so when several
/// plugins are present the last one in listing order is reported. A
/// `kube-router` image resolves to `Unknown` and overwrites as well.
///
/// K3s embeds Flannel in its binary, so an unresolved K3s cluster is
/// reported as Flannel.
pub fn classify(pods: &[PodFacts], distro: Distro) -> Cni {
    let mut cni = Cni::Unknown;

    for image in pods
        .iter()
        .filter(|p| p.namespace == KUBE_SYSTEM)
        .flat_map(|p| p.container_images.iter())
    {
        let image = image.to_lowercase();
        if KNOWN_PLUGINS.iter().any(|plugin| image.contains(plugin)) {
            cni = from_image(&image);
            debug!(%image, %cni, "matched network plugin image");
        }
    }

    if distro == Distro::K3s && cni == Cni::Unknown {
        cni = Cni::Flannel;
    }

    debug!(%cni, "classified cni");
    cni
}

fn from_image(image: &str) -> Cni {
    if image.contains("cilium") {
        Cni::Cilium
    } else if image.contains("calico") {
        Cni::Calico
    } else if image.contains("weaveworks/weave") {
        Cni::WeaveNet
    } else if image.contains("flannel") {
        Cni::Flannel
    } else {
        Cni::Unknown
    }
}
