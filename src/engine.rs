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

//! Turns a [`RawClusterFacts`] snapshot into a [`ClusterFingerprint`].
//!
//! Every facet has its own classifier in a submodule. They are pure and
//! independent, except that the CNI classifier needs the distribution.

use crate::types::facts::RawClusterFacts;
use crate::types::fingerprint::ClusterFingerprint;
use chrono::{DateTime, Utc};
use snafu::Snafu;
use tracing::info;

pub mod cni;
pub mod counts;
pub mod distro;
pub mod gitops;
pub mod ingress;
pub mod storage;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("the cluster reported no nodes, cannot determine runtime or cluster age"))]
    NoNodes,
}

/// Build the fingerprint. `now` anchors the cluster age.
pub fn fingerprint(
    facts: &RawClusterFacts,
    now: DateTime<Utc>,
) -> Result<ClusterFingerprint, Error> {
    let nodes = counts::summarize_nodes(&facts.nodes, now)?;
    let pods = counts::summarize_pods(&facts.pods);

    let distro = distro::classify(
        &facts.version_string,
        facts.default_service_endpoint_port,
        &facts.nodes,
    );
    let cni = cni::classify(&facts.pods, distro);

    let fingerprint = ClusterFingerprint {
        distro,
        server_version: facts.version_string.clone(),
        node_count: nodes.node_count,
        max_pod_capacity: nodes.max_pod_capacity,
        pod_count: pods.pod_count,
        unhealthy_pod_count: pods.unhealthy_pod_count,
        namespace_count: facts.namespaces.len(),
        service_count: facts.service_count,
        container_runtime: nodes.container_runtime,
        storage_solution: storage::classify(&facts.storage_classes),
        gitops_tool: gitops::classify(&facts.namespaces),
        cni,
        ingress: ingress::classify(&facts.ingress_signals),
        cluster_age_days: nodes.cluster_age_days,
    };

    info!(distro = %fingerprint.distro, nodes = fingerprint.node_count, "cluster fingerprinted");
    Ok(fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_facts, fixed_now, namespaces, node, pod, storage_class};
    use crate::types::facts::{IngressSignals, PodPhase};
    use crate::types::fingerprint::{Cni, Distro, GitopsTool, IngressController, StorageSolution};

    fn scenario_a() -> RawClusterFacts {
        let now = fixed_now();
        let mut pods = Vec::new();
        for _ in 0..20 {
            pods.push(pod("default", PodPhase::Running, &["nginx:1.25"]));
        }
        for _ in 0..3 {
            pods.push(pod("jobs", PodPhase::Succeeded, &["busybox:1.36"]));
        }
        for _ in 0..2 {
            pods.push(pod("default", PodPhase::Pending, &["redis:7"]));
        }

        RawClusterFacts {
            nodes: vec![node("a", now, 120, 10), node("b", now, 400, 10), node("c", now, 30, 10)],
            pods,
            namespaces: namespaces(&["default", "kube-system", "kube-public", "jobs"]),
            version_string: "v1.28.2+k3s1".to_string(),
            ..create_test_facts()
        }
    }

    #[test]
    fn test_scenario_a_k3s_cluster() {
        let fp = fingerprint(&scenario_a(), fixed_now()).expect("fingerprint");

        assert_eq!(fp.distro, Distro::K3s);
        assert_eq!(fp.server_version, "v1.28.2+k3s1");
        assert_eq!(fp.node_count, 3);
        assert_eq!(fp.max_pod_capacity, 30);
        assert_eq!(fp.pod_count, 25);
        assert_eq!(fp.unhealthy_pod_count, 2);
        assert_eq!(fp.namespace_count, 4);
        assert_eq!(fp.gitops_tool, GitopsTool::None);
        assert_eq!(fp.cluster_age_days, 400);
        // nothing in kube-system advertises a plugin
        assert_eq!(fp.cni, Cni::Flannel);
    }

    #[test]
    fn test_scenario_b_flux_and_argocd() {
        let facts = RawClusterFacts {
            namespaces: namespaces(&["default", "flux-system", "argocd-system"]),
            ..create_test_facts()
        };
        let fp = fingerprint(&facts, fixed_now()).expect("fingerprint");
        assert_eq!(fp.gitops_tool, GitopsTool::FluxAndArgoCD);
    }

    #[test]
    fn test_scenario_c_storage() {
        let cases = [
            (
                vec![storage_class("standard", false), storage_class("longhorn", false)],
                StorageSolution::Longhorn,
            ),
            (vec![storage_class("rook-ceph-block", false)], StorageSolution::RookCeph),
            (vec![], StorageSolution::None),
        ];

        for (storage_classes, expected) in cases {
            let facts = RawClusterFacts {
                storage_classes,
                ..create_test_facts()
            };
            let fp = fingerprint(&facts, fixed_now()).expect("fingerprint");
            assert_eq!(fp.storage_solution, expected);
        }
    }

    #[test]
    fn test_vanilla_cluster_with_addons() {
        let now = fixed_now();
        let facts = RawClusterFacts {
            nodes: vec![node("cp", now, 90, 110).with_runtime("containerd://1.7.13")],
            pods: vec![
                pod("kube-system", PodPhase::Running, &["quay.io/cilium/cilium:v1.15.1"]),
                pod("kube-system", PodPhase::Failed, &["registry.k8s.io/etcd:3.5.12-0"]),
            ],
            service_count: 7,
            default_service_endpoint_port: 6443,
            ingress_signals: IngressSignals {
                crd_body_text: "ingressroutes.traefik.containo.us".to_string(),
                ingress_class_body_text: "k8s.io/ingress-nginx".to_string(),
            },
            version_string: "v1.30.1".to_string(),
            ..create_test_facts()
        };

        let fp = fingerprint(&facts, now).expect("fingerprint");
        assert_eq!(fp.distro, Distro::K8s);
        assert_eq!(fp.cni, Cni::Cilium);
        assert_eq!(fp.service_count, 7);
        assert_eq!(fp.unhealthy_pod_count, 1);
        assert_eq!(fp.container_runtime, "containerd://1.7.13");
        assert!(fp.ingress.contains(IngressController::Traefik));
        assert_eq!(fp.ingress.to_string(), "Traefik, Nginx");
    }

    #[test]
    fn test_talos_cluster() {
        let now = fixed_now();
        let facts = RawClusterFacts {
            nodes: vec![
                node("cp", now, 10, 110).with_os_image("Talos (v1.7.0)"),
                node("w1", now, 10, 110).with_os_image("Talos (v1.7.0)"),
            ],
            ..create_test_facts()
        };
        let fp = fingerprint(&facts, now).expect("fingerprint");
        assert_eq!(fp.distro, Distro::Talos);
        assert_eq!(fp.cni, Cni::Unknown);
    }

    #[test]
    fn test_no_nodes_aborts() {
        let facts = RawClusterFacts {
            nodes: vec![],
            ..create_test_facts()
        };
        let err = fingerprint(&facts, fixed_now()).expect_err("must not fingerprint");
        assert!(matches!(err, Error::NoNodes));
    }

    #[test]
    fn test_same_facts_same_fingerprint() {
        let facts = scenario_a();
        let first = fingerprint(&facts, fixed_now()).expect("fingerprint");
        let second = fingerprint(&facts, fixed_now()).expect("fingerprint");
        assert_eq!(first, second);
    }
}
