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

use crate::types::facts::IngressSignals;
use crate::types::fingerprint::{IngressController, IngressSet};
use tracing::debug;

/// API group of the Traefik CRDs.
const TRAEFIK_CRD_GROUP: &str = "traefik.containo.us";
const NGINX_MARKER: &str = "nginx";

pub fn classify(signals: &IngressSignals) -> IngressSet {
    let mut ingress = IngressSet::default();

    if signals.crd_body_text.contains(TRAEFIK_CRD_GROUP) {
        ingress.insert(IngressController::Traefik);
    }
    if signals.ingress_class_body_text.contains(NGINX_MARKER) {
        ingress.insert(IngressController::Nginx);
    }

    debug!(%ingress, "classified ingress");
    ingress
}
