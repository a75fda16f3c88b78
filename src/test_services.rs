use std::{cell::Cell, rc::Rc};

use actix_utils::future::ok;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, fn_service},
};

/// Creates service that always responds with `200 OK` and counts how many times it was called.
pub(crate) fn counting_service(
    calls: Rc<Cell<usize>>,
) -> impl Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> {
    fn_service(move |req: ServiceRequest| {
        calls.set(calls.get() + 1);
        ok(req.into_response(HttpResponse::Ok().finish()))
    })
}
