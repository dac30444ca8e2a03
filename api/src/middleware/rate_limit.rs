//! Rate limiting middleware for API endpoints
//!
//! Each client IP may send `max_requests` requests per fixed window. Counters
//! live in Redis so every server instance shares them. When the counter store
//! is unreachable the request is let through and a warning is logged.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER},
        StatusCode,
    },
    Error,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    rc::Rc,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use bomato_infra::RedisClient;
use bomato_shared::config::RateLimitConfig;

use crate::handlers::error::error_response;

/// Message returned with 429 responses
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// State of a client's current window after counting one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHit {
    /// Requests seen in the window, including this one
    pub count: u64,
    /// Seconds until the window resets
    pub reset_after: u64,
}

/// Counts requests per client over fixed windows
#[async_trait]
pub trait RequestCounter: Send + Sync {
    async fn hit(&self, client: &str, window_seconds: u64) -> anyhow::Result<WindowHit>;
}

/// Redis-backed counter: `INCR bomato:ratelimit:<ip>` with expiry set on creation
#[derive(Clone)]
pub struct RedisRequestCounter {
    client: RedisClient,
}

impl RedisRequestCounter {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestCounter for RedisRequestCounter {
    async fn hit(&self, client: &str, window_seconds: u64) -> anyhow::Result<WindowHit> {
        let key = self.client.key(&["ratelimit", client]);
        let count = self.client.increment(&key, Some(window_seconds)).await?;
        let reset_after = self
            .client
            .ttl(&key)
            .await?
            .map(|ttl| ttl.max(0) as u64)
            .unwrap_or(window_seconds);

        Ok(WindowHit {
            count: count.max(0) as u64,
            reset_after,
        })
    }
}

/// Process-local counter; windows that have run out are dropped on every hit
#[derive(Debug, Default)]
pub struct InMemoryRequestCounter {
    windows: Mutex<HashMap<String, (u64, Instant)>>,
}

impl InMemoryRequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clients with an open window
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().map(|windows| windows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RequestCounter for InMemoryRequestCounter {
    async fn hit(&self, client: &str, window_seconds: u64) -> anyhow::Result<WindowHit> {
        let window = Duration::from_secs(window_seconds);
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| anyhow::anyhow!("rate limit counter lock poisoned"))?;

        windows.retain(|_, (_, started)| now.duration_since(*started) < window);

        let entry = windows.entry(client.to_string()).or_insert((0, now));
        entry.0 += 1;

        let elapsed = now.duration_since(entry.1);
        Ok(WindowHit {
            count: entry.0,
            reset_after: window.saturating_sub(elapsed).as_secs(),
        })
    }
}

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimiter {
    counter: Arc<dyn RequestCounter>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(counter: Arc<dyn RequestCounter>, config: RateLimitConfig) -> Self {
        Self { counter, config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            counter: Arc::clone(&self.counter),
            config: self.config.clone(),
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    counter: Arc<dyn RequestCounter>,
    config: RateLimitConfig,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let counter = Arc::clone(&self.counter);
        let config = self.config.clone();

        Box::pin(async move {
            if !config.enabled {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let client = client_ip(&req);
            let hit = match counter.hit(&client, config.window_seconds).await {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::warn!(client = %client, error = %e, "Rate limit check failed, allowing request");
                    return service.call(req).await.map(ServiceResponse::map_into_left_body);
                }
            };

            if hit.count > config.max_requests {
                tracing::warn!(client = %client, count = hit.count, "Rate limit exceeded");
                let mut response =
                    error_response(StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE, None);
                let headers = response.headers_mut();
                insert_limit_headers(headers, &config, &hit);
                headers.insert(RETRY_AFTER, HeaderValue::from(hit.reset_after));
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut response = service.call(req).await?;
            insert_limit_headers(response.headers_mut(), &config, &hit);
            Ok(response.map_into_left_body())
        })
    }
}

/// Client address as seen on the socket; forwarded headers are not trusted
fn client_ip(req: &ServiceRequest) -> String {
    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

fn insert_limit_headers(headers: &mut HeaderMap, config: &RateLimitConfig, hit: &WindowHit) {
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(config.max_requests),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(config.max_requests.saturating_sub(hit.count)),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-reset"),
        HeaderValue::from(hit.reset_after),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_counter_counts_per_client() {
        let counter = InMemoryRequestCounter::new();

        assert_eq!(counter.hit("10.0.0.1", 60).await.unwrap().count, 1);
        assert_eq!(counter.hit("10.0.0.1", 60).await.unwrap().count, 2);
        assert_eq!(counter.hit("10.0.0.2", 60).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn test_in_memory_counter_resets_after_window() {
        let counter = InMemoryRequestCounter::new();

        counter.hit("10.0.0.1", 0).await.unwrap();
        let hit = counter.hit("10.0.0.1", 0).await.unwrap();
        assert_eq!(hit.count, 1);
        assert_eq!(hit.reset_after, 0);
    }

    #[tokio::test]
    async fn test_in_memory_counter_evicts_expired_windows() {
        let counter = InMemoryRequestCounter::new();

        for i in 0..50 {
            counter.hit(&format!("10.0.0.{}", i), 0).await.unwrap();
        }
        assert_eq!(counter.tracked_clients(), 1);

        let counter = InMemoryRequestCounter::new();
        counter.hit("10.0.1.1", 60).await.unwrap();
        counter.hit("10.0.1.2", 60).await.unwrap();
        counter.hit("10.0.1.1", 60).await.unwrap();
        assert_eq!(counter.tracked_clients(), 2);
    }
}
