use crate::{
    core::{
        attributes::{Attributes, Request as AuthzRequest, ResourceAttributes, UserInfo},
        Authorizer, Decision,
    },
    index::Reader,
    k8s::{SubjectAccessReview, SubjectAccessReviewSpec, SubjectAccessReviewStatus},
};
use futures::future;
use http_body_util::BodyExt;
use hyper::{http, Request, Response};
use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Answers `SubjectAccessReview` webhook requests from the API server.
#[derive(Clone, Debug)]
pub struct AccessReview {
    authorizer: Authorizer<Reader>,
    metrics: ReviewMetrics,
}

#[derive(Clone, Debug)]
pub struct ReviewMetrics {
    decisions: Family<DecisionLabels, Counter>,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct DecisionLabels {
    decision: &'static str,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read request body: {0}")]
    Request(#[from] hyper::Error),

    #[error("failed to encode json response: {0}")]
    Json(#[from] serde_json::Error),
}

type Body = http_body_util::Full<bytes::Bytes>;

// === impl AccessReview ===

impl tower::Service<Request<hyper::body::Incoming>> for AccessReview {
    type Response = Response<Body>;
    type Error = Error;
    type Future = future::BoxFuture<'static, Result<Response<Body>, Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<hyper::body::Incoming>) -> Self::Future {
        trace!(?req);
        if req.method() != http::Method::POST || req.uri().path() != "/" {
            return Box::pin(future::ok(
                Response::builder()
                    .status(http::StatusCode::NOT_FOUND)
                    .body(Body::default())
                    .expect("not found response must be valid"),
            ));
        }

        let review = self.clone();
        Box::pin(async move {
            let bytes = req.into_body().collect().await?.to_bytes();
            json_response(review.respond(&bytes))
        })
    }
}

impl AccessReview {
    pub fn new(authorizer: Authorizer<Reader>, metrics: ReviewMetrics) -> Self {
        Self {
            authorizer,
            metrics,
        }
    }

    /// Decodes a review, authorizes it, and returns the review with its status set.
    fn respond(&self, body: &[u8]) -> SubjectAccessReview {
        let mut review = match serde_json::from_slice::<SubjectAccessReview>(body) {
            Ok(review) => review,
            Err(error) => {
                warn!(%error, "Failed to parse request body");
                self.metrics.inc("error");
                return SubjectAccessReview {
                    status: Some(SubjectAccessReviewStatus {
                        allowed: false,
                        evaluation_error: Some(error.to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                };
            }
        };
        trace!(?review);

        let decision = match attributes(&review.spec) {
            Some(attrs) => self.authorizer.authorize(&attrs),
            None => Decision::NoOpinion {
                reason: "no resource or non-resource attributes".to_string(),
            },
        };
        debug!(user = ?review.spec.user, %decision, reason = decision.reason());
        self.metrics.inc(match decision {
            Decision::Allow => "allow",
            Decision::NoOpinion { .. } => "no-opinion",
        });

        let reason = decision.reason();
        review.status = Some(SubjectAccessReviewStatus {
            allowed: decision.is_allowed(),
            denied: Some(false),
            reason: (!reason.is_empty()).then(|| reason.to_string()),
            evaluation_error: None,
        });
        review
    }
}

/// Converts a review's spec into request attributes. Returns `None` when the review describes
/// neither a resource nor a non-resource request.
fn attributes(spec: &SubjectAccessReviewSpec) -> Option<Attributes> {
    let request = match (&spec.resource_attributes, &spec.non_resource_attributes) {
        (Some(attrs), _) => AuthzRequest::Resource(ResourceAttributes {
            verb: attrs.verb.clone().unwrap_or_default(),
            api_group: attrs.group.clone().unwrap_or_default(),
            api_version: attrs.version.clone().unwrap_or_default(),
            resource: attrs.resource.clone().unwrap_or_default(),
            subresource: attrs.subresource.clone().unwrap_or_default(),
            namespace: attrs.namespace.clone().unwrap_or_default(),
            name: attrs.name.clone().unwrap_or_default(),
        }),
        (None, Some(attrs)) => AuthzRequest::NonResource {
            verb: attrs.verb.clone().unwrap_or_default(),
            path: attrs.path.clone().unwrap_or_default(),
        },
        (None, None) => return None,
    };

    let user = UserInfo {
        name: spec.user.clone().unwrap_or_default(),
        uid: spec.uid.clone().unwrap_or_default(),
        groups: spec.groups.clone().unwrap_or_default(),
        extra: spec.extra.clone().unwrap_or_default(),
    };
    Some(Attributes { user, request })
}

fn json_response(rsp: SubjectAccessReview) -> Result<Response<Body>, Error> {
    let bytes = serde_json::to_vec(&rsp)?;
    Ok(Response::builder()
        .status(http::StatusCode::OK)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(bytes))
        .expect("access review response must be valid"))
}

// === impl ReviewMetrics ===

impl ReviewMetrics {
    pub fn register(reg: &mut Registry) -> Self {
        let decisions = Family::<DecisionLabels, Counter>::default();
        reg.register(
            "decisions",
            "Count of access reviews by decision",
            decisions.clone(),
        );
        Self { decisions }
    }

    fn inc(&self, decision: &'static str) {
        self.decisions.get_or_create(&DecisionLabels { decision }).inc();
    }
}
