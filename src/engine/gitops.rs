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

use crate::types::facts::NamespaceFacts;
use crate::types::fingerprint::GitopsTool;
use tracing::debug;

const FLUX_NAMESPACE: &str = "flux-system";
const ARGOCD_MARKER: &str = "argocd";

/// Flux installs into `flux-system`; Argo CD namespaces are matched by substring.
pub fn classify(namespaces: &[NamespaceFacts]) -> GitopsTool {
    let has_flux = namespaces.iter().any(|ns| ns.name == FLUX_NAMESPACE);
    let has_argocd = namespaces.iter().any(|ns| ns.name.contains(ARGOCD_MARKER));

    let tool = match (has_flux, has_argocd) {
        (true, true) => GitopsTool::FluxAndArgoCD,
        (true, false) => GitopsTool::Flux,
        (false, true) => GitopsTool::ArgoCD,
        (false, false) => GitopsTool::None,
    };

    debug!(%tool, has_flux, has_argocd, "classified gitops tool");
    tool
}
