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

use crate::types::facts::StorageClassFacts;
use crate::types::fingerprint::StorageSolution;
use tracing::debug;

/// Classify the storage solution from StorageClass names.
///
/// A class named exactly `longhorn` means Longhorn, a name containing `rook`
/// or `ceph` means Rook/Ceph. Like the CNI classifier, each matching class
/// overwrites the previous result. Without a known match, an existing
/// default StorageClass is reported by name.
pub fn classify(storage_classes: &[StorageClassFacts]) -> StorageSolution {
    let mut solution = StorageSolution::None;

    for class in storage_classes {
        if class.name == "longhorn" {
            solution = StorageSolution::Longhorn;
        } else if class.name.contains("rook") || class.name.contains("ceph") {
            solution = StorageSolution::RookCeph;
        }
    }

    if solution == StorageSolution::None
        && let Some(default) = storage_classes.iter().find(|c| c.is_default)
    {
        solution = StorageSolution::Detected {
            name: default.name.clone(),
        };
    }

    debug!(%solution, classes = storage_classes.len(), "classified storage");
    solution
}
