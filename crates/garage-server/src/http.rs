//! hyper accept loop.
//!
//! One task per connection. Each request body is read in full (up to
//! [`MAX_BODY_BYTES`]) and handed to [`dispatch`]; the engine lock is
//! held only inside that synchronous call.

use std::future::Future;
use std::net::SocketAddr;

use garage_engine::SharedGarage;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use tokio::net::{TcpListener, TcpStream};

use crate::handler::{dispatch, Reply};

/// Largest request body accepted.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Accept connections on `listener` until `shutdown` resolves.
///
/// Connections already accepted keep running on their own tasks.
pub async fn serve(listener: TcpListener, garage: SharedGarage, shutdown: impl Future<Output = ()>) {
    let accept = tokio::spawn(accept_loop(listener, garage));
    shutdown.await;
    info!("received shutdown request");
    accept.abort();
}

async fn accept_loop(listener: TcpListener, garage: SharedGarage) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let garage = garage.clone();
                tokio::spawn(async move {
                    if let Err(err) = serve_connection(stream, peer, garage).await {
                        error!("connection error from {peer}: {err}");
                    }
                });
            }
            Err(err) => {
                error!("accept error: {err}");
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    garage: SharedGarage,
) -> Result<(), hyper::Error> {
    debug!("connection from {peer}");
    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| {
        let garage = garage.clone();
        async move { Ok::<_, hyper::Error>(handle_request(req, &garage).await) }
    });
    http1::Builder::new().serve_connection(io, service).await?;
    Ok(())
}

async fn handle_request(req: Request<Incoming>, garage: &SharedGarage) -> Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let reply = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => dispatch(garage, &parts.method, parts.uri.path(), &collected.to_bytes()),
        Err(err) => {
            debug!("unreadable request body: {err}");
            Reply {
                status: StatusCode::BAD_REQUEST,
                body: br#"{"error":"Unreadable request body"}"#.to_vec(),
            }
        }
    };
    into_response(reply)
}

fn into_response(reply: Reply) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(reply.body)));
    *response.status_mut() = reply.status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
