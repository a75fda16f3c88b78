use std::{rc::Rc, sync::Arc};

use actix_utils::future::{Ready, ok};
use actix_web::{
    HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::ContentType,
};
use futures_core::future::LocalBoxFuture;

use crate::{IpRanges, IpWhitelistConfig, IpWhitelistError};

/// Middleware that only lets requests from whitelisted IP addresses through.
///
/// The address checked is the peer address of the underlying connection. Headers like `Forwarded`
/// or `X-Forwarded-For` are never consulted, so when running behind a reverse proxy the proxy's own
/// address is what gets checked.
///
/// Requests from addresses outside of the configured ranges, or whose peer address is unknown, are
/// answered with `403 Forbidden` and the wrapped service is not called. The response body names the
/// middleware instance so rejections can be traced back to the right configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, HttpResponse, web};
/// use actix_web_ip_whitelist::IpWhitelist;
///
/// let mw = IpWhitelist::new(["10.0.0.0/8", "192.168.1.7", "::1"], "internal").unwrap();
///
/// App::new()
///     .wrap(mw)
///     .route("/", web::get().to(|| async { HttpResponse::Ok().finish() }))
/// # ;
/// ```
///
/// Invalid entries are reported when constructing the middleware:
/// ```
/// use actix_web_ip_whitelist::IpWhitelist;
///
/// let err = IpWhitelist::new(["foo"], "internal").unwrap_err();
/// assert_eq!(err.spec(), Some("foo"));
/// ```
#[derive(Debug, Clone)]
pub struct IpWhitelist {
    ranges: Arc<IpRanges>,
    name: Arc<str>,
}

impl IpWhitelist {
    /// Constructs new IP whitelist middleware from a list of addresses and CIDR blocks.
    ///
    /// `name` identifies this instance in rejection responses and logs.
    pub fn new<I, S>(source_range: I, name: impl Into<String>) -> Result<Self, IpWhitelistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let ranges = IpRanges::compile(source_range)?;

        tracing::debug!(
            name = %name,
            "setting up IP whitelist with {} source range(s)",
            ranges.len(),
        );

        Ok(Self::from_ranges(ranges, name))
    }

    /// Constructs new IP whitelist middleware from deserialized config.
    pub fn from_config(
        config: &IpWhitelistConfig,
        name: impl Into<String>,
    ) -> Result<Self, IpWhitelistError> {
        Self::new(&config.source_range, name)
    }

    /// Constructs new IP whitelist middleware from an already compiled set of ranges.
    pub fn from_ranges(ranges: IpRanges, name: impl Into<String>) -> Self {
        Self {
            ranges: Arc::new(ranges),
            name: Arc::from(name.into()),
        }
    }

    /// Returns the set of ranges this middleware lets through.
    pub fn ranges(&self) -> &IpRanges {
        &self.ranges
    }

    /// Returns the name of this middleware instance.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S, B: 'static> Transform<S, ServiceRequest> for IpWhitelist
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Transform = IpWhitelistMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(IpWhitelistMiddleware {
            service: Rc::new(service),
            ranges: Arc::clone(&self.ranges),
            name: Arc::clone(&self.name),
        })
    }
}

/// Middleware service implementation for [`IpWhitelist`].
#[doc(hidden)]
#[allow(missing_debug_implementations)]
pub struct IpWhitelistMiddleware<S> {
    service: Rc<S>,
    ranges: Arc<IpRanges>,
    name: Arc<str>,
}

impl<S, B: 'static> Service<ServiceRequest> for IpWhitelistMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let peer_addr = req.connection_info().peer_addr().map(str::to_owned);

        let authorized = peer_addr
            .as_deref()
            .and_then(|addr| self.ranges.is_authorized(addr).ok());

        if let Some(ip) = authorized {
            tracing::trace!(name = %self.name, "accepting IP {ip}");

            let service = Rc::clone(&self.service);

            return Box::pin(async move {
                service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body)
            });
        }

        tracing::debug!(
            name = %self.name,
            "rejecting request from {}",
            peer_addr.as_deref().unwrap_or("unknown peer"),
        );

        let res = HttpResponse::Forbidden()
            .content_type(ContentType::plaintext())
            .body(format!("{}: Forbidden", self.name));

        Box::pin(ok(req.into_response(res).map_into_right_body()))
    }
}
