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

use super::{Error, NoNodesSnafu};
use crate::types::facts::{NodeFacts, PodFacts};
use chrono::{DateTime, Utc};
use snafu::OptionExt;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary {
    pub node_count: usize,
    pub max_pod_capacity: u64,
    pub container_runtime: String,
    pub cluster_age_days: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PodSummary {
    pub pod_count: usize,
    pub unhealthy_pod_count: usize,
}

/// Node count, total pod capacity, runtime of the first node and the age
/// of the oldest node. A cluster without nodes has none of these.
pub fn summarize_nodes(nodes: &[NodeFacts], now: DateTime<Utc>) -> Result<NodeSummary, Error> {
    let first = nodes.first().context(NoNodesSnafu)?;

    // strict comparison keeps the first-seen node on ties
    let oldest = nodes.iter().fold(first, |oldest, node| {
        if node.creation_timestamp < oldest.creation_timestamp {
            node
        } else {
            oldest
        }
    });

    let summary = NodeSummary {
        node_count: nodes.len(),
        max_pod_capacity: nodes
            .iter()
            .fold(0u64, |total, n| total.saturating_add(n.pod_capacity)),
        container_runtime: first.container_runtime_version.clone(),
        cluster_age_days: age_in_days(oldest.creation_timestamp, now),
    };

    debug!(
        oldest = %oldest.name,
        nodes = summary.node_count,
        age_days = summary.cluster_age_days,
        "summarized nodes"
    );
    Ok(summary)
}

pub fn summarize_pods(pods: &[PodFacts]) -> PodSummary {
    PodSummary {
        pod_count: pods.len(),
        unhealthy_pod_count: pods.iter().filter(|p| !p.phase.is_healthy()).count(),
    }
}

/// Whole days elapsed, floored. Creation times in the future count as 0.
fn age_in_days(created: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let hours = (now - created).num_hours();
    u64::try_from(hours / 24).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{fixed_now, node, pod};
    use crate::types::facts::PodPhase;
    use chrono::Duration;

    #[test]
    fn test_empty_node_list_is_a_precondition_violation() {
        let err = summarize_nodes(&[], fixed_now()).expect_err("no nodes must fail");
        assert!(matches!(err, Error::NoNodes));
    }

    #[test]
    fn test_capacity_is_summed() {
        let now = fixed_now();
        let nodes = vec![node("a", now, 10, 110), node("b", now, 10, 250), node("c", now, 10, 32)];
        let summary = summarize_nodes(&nodes, now).expect("nodes present");
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.max_pod_capacity, 392);
    }

    #[test]
    fn test_capacity_sum_saturates() {
        let now = fixed_now();
        let nodes = vec![node("a", now, 10, u64::MAX), node("b", now, 10, 110)];
        let summary = summarize_nodes(&nodes, now).expect("nodes present");
        assert_eq!(summary.max_pod_capacity, u64::MAX);
    }

    #[test]
    fn test_age_uses_oldest_node() {
        let now = fixed_now();
        let nodes = vec![node("a", now, 12, 110), node("b", now, 400, 110), node("c", now, 3, 110)];
        let summary = summarize_nodes(&nodes, now).expect("nodes present");
        assert_eq!(summary.cluster_age_days, 400);
    }

    #[test]
    fn test_age_is_floored_to_whole_days() {
        let now = fixed_now();
        let mut n = node("a", now, 0, 110);
        n.creation_timestamp = now - Duration::hours(47) - Duration::minutes(59);
        let summary = summarize_nodes(&[n], now).expect("nodes present");
        assert_eq!(summary.cluster_age_days, 1);
    }

    #[test]
    fn test_future_creation_time_counts_as_zero_days() {
        let now = fixed_now();
        let mut n = node("a", now, 0, 110);
        n.creation_timestamp = now + Duration::days(3);
        let summary = summarize_nodes(&[n], now).expect("nodes present");
        assert_eq!(summary.cluster_age_days, 0);
    }

    #[test]
    fn test_runtime_comes_from_first_node() {
        let now = fixed_now();
        let nodes = vec![
            node("a", now, 1, 110).with_runtime("containerd://1.7.13"),
            node("b", now, 900, 110).with_runtime("cri-o://1.29.1"),
        ];
        let summary = summarize_nodes(&nodes, now).expect("nodes present");
        assert_eq!(summary.container_runtime, "containerd://1.7.13");
    }

    #[test]
    fn test_unhealthy_plus_healthy_equals_total() {
        let pods = vec![
            pod("default", PodPhase::Running, &[]),
            pod("default", PodPhase::Succeeded, &[]),
            pod("default", PodPhase::Pending, &[]),
            pod("default", PodPhase::Failed, &[]),
            pod("default", PodPhase::Unknown, &[]),
        ];
        let summary = summarize_pods(&pods);
        let healthy = pods.iter().filter(|p| p.phase.is_healthy()).count();

        assert_eq!(summary.pod_count, 5);
        assert_eq!(summary.unhealthy_pod_count, 3);
        assert_eq!(summary.unhealthy_pod_count + healthy, summary.pod_count);
    }

    #[test]
    fn test_no_pods() {
        assert_eq!(summarize_pods(&[]), PodSummary::default());
    }
}
