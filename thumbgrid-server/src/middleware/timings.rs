/* This file is part of the ThumbGrid project
*
*  Copyright (C) 2026 ThumbGrid contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::{future::{ready, Ready}, time::Instant};

use actix_web::{dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform}, error::Error, http::header::{HeaderName, HeaderValue}};
use futures::{future::LocalBoxFuture, FutureExt};
use log::{debug, error};

pub const TIME_SPENT_HEADER: &str = "x-time-spent";

/// Logs how long each request took and optionally reports it in the `X-Time-Spent` header
#[derive(Clone, Copy)]
pub struct Timings {
    pub send_header: bool,
}

impl<S, B> Transform<S, ServiceRequest> for Timings
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingsInstance<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingsInstance { service, send_header: self.send_header }))
    }
}

pub struct TimingsInstance<S> {
    service: S,
    send_header: bool,
}

impl<S, B> Service<ServiceRequest> for TimingsInstance<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let send_header = self.send_header;
        let method = req.method().clone();
        let path = req.path().to_owned();
        let srv = self.service.call(req);

        async move {
            let mut resp = srv.await?;
            let elapsed = start.elapsed();
            debug!("{method} {path} -> {} in {elapsed:?}", resp.status());
            if send_header {
                match HeaderValue::try_from(format!("{} ns", elapsed.as_nanos())) {
                    Ok(value) => { resp.headers_mut().insert(HeaderName::from_static(TIME_SPENT_HEADER), value); },
                    Err(e) => error!("Failed to build the X-Time-Spent header: {e}"),
                }
            }
            Ok(resp)
        }.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    #[actix_web::test]
    async fn header_is_only_sent_when_enabled() {
        for send_header in [false, true] {
            let app = test::init_service(
                App::new()
                    .wrap(Timings { send_header })
                    .route("/", web::get().to(HttpResponse::Ok))
            ).await;
            let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            let header = resp.headers().get(TIME_SPENT_HEADER).and_then(|v| v.to_str().ok());
            assert_eq!(header.is_some(), send_header);
            if let Some(header) = header {
                assert!(header.ends_with(" ns"));
            }
        }
    }
}
