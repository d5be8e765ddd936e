use std::time::Duration;
use std::task::{Context, Poll};
use std::pin::Pin;
use std::future::Future;

use tower::{Layer, Service};
use tokio::time::Sleep;
use pin_project::pin_project;

use crate::net::error;

#[derive(Debug)]
pub enum TimeoutError<E> {
    Service(E),
    Timeout,
}

impl<E> From<E> for TimeoutError<E> {
    fn from(e: E) -> Self {
        TimeoutError::Service(e)
    }
}

impl<E> From<TimeoutError<E>> for error::Error
where
    E: Into<error::Error>
{
    fn from(err: TimeoutError<E>) -> Self {
        match err {
            TimeoutError::Service(e) => e.into(),
            TimeoutError::Timeout => error::Error::api(error::GeneralKind::Timeout)
        }
    }
}

#[pin_project]
pub struct TimeoutFuture<F> {
    #[pin]
    response: F,
    #[pin]
    sleep: Sleep,
}

impl<F, Response, Error> Future for TimeoutFuture<F>
where
    F: Future<Output = Result<Response, Error>>,
{
    type Output = Result<Response, TimeoutError<Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        if let Poll::Ready(result) = this.response.poll(cx) {
            return Poll::Ready(result.map_err(Into::into));
        }

        match this.sleep.poll(cx) {
            Poll::Ready(()) => Poll::Ready(Err(TimeoutError::Timeout)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// fails a request with [`TimeoutError::Timeout`] once the duration elapses
#[derive(Debug, Clone)]
pub struct Timeout<S> {
    inner: S,
    timeout: Duration,
}

impl<S, Request> Service<Request> for Timeout<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = TimeoutError<S::Error>;
    type Future = TimeoutFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let response = self.inner.call(request);
        let sleep = tokio::time::sleep(self.timeout);

        TimeoutFuture { response, sleep }
    }
}

#[derive(Debug, Clone)]
pub struct TimeoutLayer {
    timeout: Duration,
}

impl TimeoutLayer {
    pub fn new(timeout: Duration) -> Self {
        TimeoutLayer { timeout }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = Timeout<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Timeout {
            inner,
            timeout: self.timeout
        }
    }
}

#[cfg(test)]
mod test {
    use std::convert::Infallible;

    use tower::{ServiceBuilder, ServiceExt};

    use super::*;

    #[tokio::test]
    async fn slow_service_times_out() {
        let svc = ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_millis(10)))
            .service_fn(|wait: u64| async move {
                tokio::time::sleep(Duration::from_millis(wait)).await;

                Ok::<_, Infallible>(wait)
            });

        let fast = svc.clone().oneshot(0).await;
        let slow = svc.oneshot(1_000).await;

        assert!(matches!(fast, Ok(0)));
        assert!(matches!(slow, Err(TimeoutError::Timeout)));
    }
}
