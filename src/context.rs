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

use crate::types;
use crate::types::facts::{
    IngressSignals, NamespaceFacts, NodeFacts, PodFacts, RawClusterFacts, StorageClassFacts,
    endpoint_port,
};
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::api::storage::v1 as storagev1;
use kube::api::{Api, ListParams};
use kube::config::KubeConfigOptions;
use kube::{Client, Config, Resource};
use serde::de::DeserializeOwned;
use snafu::futures::TryFutureExt;
use snafu::{ResultExt, Snafu};
use std::fmt::Debug;
use tracing::{debug, info};

const CRD_PATH: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";
const INGRESS_CLASS_PATH: &str = "/apis/networking.k8s.io/v1/ingressclasses";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to infer cluster configuration: {}", source))]
    InferConfig {
        source: kube::config::InferConfigError,
    },

    #[snafu(display("failed to load kubeconfig context '{}': {}", context, source))]
    KubeconfigContext {
        context: String,
        source: kube::config::KubeconfigError,
    },

    #[snafu(display("failed to create Kubernetes client: {}", source))]
    CreateClient { source: kube::Error },

    #[snafu(display("failed to fetch {}: {}", resource, source))]
    Fetch {
        resource: &'static str,
        source: kube::Error,
    },

    #[snafu(display("failed to build request for {}: {}", resource, source))]
    BuildRequest {
        resource: &'static str,
        source: http::Error,
    },

    #[snafu(display("unexpected {} object: {}", resource, source))]
    Convert {
        resource: &'static str,
        source: types::error::Error,
    },
}

/// Read-only access to the cluster the fingerprint is taken of.
pub struct Context {
    pub(crate) client: kube::Client,
}

impl Context {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Connect using the inferred configuration, or the named kubeconfig context.
    pub async fn connect(context: Option<&str>) -> Result<Self, Error> {
        let config = match context {
            Some(name) => {
                let options = KubeConfigOptions {
                    context: Some(name.to_owned()),
                    ..Default::default()
                };
                Config::from_kubeconfig(&options)
                    .context(KubeconfigContextSnafu { context: name })
                    .await?
            }
            None => Config::infer().context(InferConfigSnafu).await?,
        };

        debug!(cluster_url = %config.cluster_url, "connecting");
        let client = Client::try_from(config).context(CreateClientSnafu)?;
        Ok(Self::new(client))
    }

    pub async fn list_all<T>(&self, resource: &'static str) -> Result<Vec<T>, Error>
    where
        T: Clone + DeserializeOwned + Debug + Resource,
        <T as Resource>::DynamicType: Default,
    {
        let api: Api<T> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .context(FetchSnafu { resource })
            .await?;

        debug!(resource, count = list.items.len(), "listed");
        Ok(list.items)
    }

    pub async fn get<T>(
        &self,
        name: &str,
        namespace: &str,
        resource: &'static str,
    ) -> Result<T, Error>
    where
        T: Clone + DeserializeOwned + Debug + Resource<Scope = NamespaceResourceScope>,
        <T as Resource>::DynamicType: Default,
    {
        let api: Api<T> = Api::namespaced(self.client.clone(), namespace);
        api.get(name).context(FetchSnafu { resource }).await
    }

    /// GET `path` and return the body untouched.
    pub async fn get_raw(&self, path: &str, resource: &'static str) -> Result<String, Error> {
        let request = http::Request::get(path)
            .body(Vec::new())
            .context(BuildRequestSnafu { resource })?;

        let body = self
            .client
            .request_text(request)
            .context(FetchSnafu { resource })
            .await?;

        debug!(resource, bytes = body.len(), "fetched raw body");
        Ok(body)
    }

    pub async fn server_version(&self) -> Result<String, Error> {
        let info = self
            .client
            .apiserver_version()
            .context(FetchSnafu { resource: "version" })
            .await?;
        Ok(info.git_version)
    }

    /// Fetch everything the engine needs. All queries run concurrently and
    /// the first failure aborts the whole collection.
    pub async fn collect(&self) -> Result<RawClusterFacts, Error> {
        info!("collecting cluster facts");

        let (
            nodes,
            pods,
            namespaces,
            services,
            endpoints,
            storage_classes,
            version_string,
            crd_body_text,
            ingress_class_body_text,
        ) = tokio::try_join!(
            self.list_all::<corev1::Node>("nodes"),
            self.list_all::<corev1::Pod>("pods"),
            self.list_all::<corev1::Namespace>("namespaces"),
            self.list_all::<corev1::Service>("services"),
            self.get::<corev1::Endpoints>("kubernetes", "default", "endpoints"),
            self.list_all::<storagev1::StorageClass>("storageclasses"),
            self.server_version(),
            self.get_raw(CRD_PATH, "customresourcedefinitions"),
            self.get_raw(INGRESS_CLASS_PATH, "ingressclasses"),
        )?;

        let facts = RawClusterFacts {
            nodes: nodes
                .iter()
                .map(NodeFacts::try_from)
                .collect::<Result<_, _>>()
                .context(ConvertSnafu { resource: "node" })?,
            pods: pods.iter().map(PodFacts::from).collect(),
            namespaces: namespaces.iter().map(NamespaceFacts::from).collect(),
            service_count: services.len(),
            default_service_endpoint_port: endpoint_port(&endpoints),
            storage_classes: storage_classes.iter().map(StorageClassFacts::from).collect(),
            ingress_signals: IngressSignals {
                crd_body_text,
                ingress_class_body_text,
            },
            version_string,
        };

        info!(
            nodes = facts.nodes.len(),
            pods = facts.pods.len(),
            version = %facts.version_string,
            "collected cluster facts"
        );
        Ok(facts)
    }
}
