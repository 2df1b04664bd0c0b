use {
    http_body_util::Full,
    hyper::{
        Request, Response,
        body::{Bytes, Incoming},
    },
    std::{
        io,
        net::{Ipv4Addr, SocketAddr},
        num::NonZeroUsize,
    },
};

/// The server settings.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub threads: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
            threads: NonZeroUsize::MIN,
        }
    }
}

/// Serves http/1 connections, calling the handler for every request.
///
/// Runs one executor on `config.threads` threads. Returns only when
/// the listener fails.
pub fn run<F>(config: Config, handler: F) -> io::Error
where
    F: Fn(Request<Incoming>) -> Response<Full<Bytes>> + Send + Sync + 'static,
{
    use {
        async_executor::Executor,
        async_net::TcpListener,
        futures_lite::future,
        hyper::{server::conn::http1, service},
        smol_hyper::rt::FuturesIo,
        std::{convert::Infallible, sync::Arc, thread},
    };

    let handler = Arc::new(handler);
    let ex = Executor::new();
    let run = async {
        let listener = match TcpListener::bind(config.addr).await {
            Ok(listener) => listener,
            Err(err) => return err,
        };

        log::info!(
            "server listens on http://{addr} with {n} threads",
            addr = config.addr,
            n = config.threads,
        );

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(ok) => ok,
                Err(err) => return err,
            };

            let serve = service::service_fn({
                let handler = Arc::clone(&handler);
                move |req| {
                    log::debug!("{peer}: {method} {uri}", method = req.method(), uri = req.uri());
                    let res = handler(req);
                    async { Ok::<_, Infallible>(res) }
                }
            });

            let task = async move {
                let io = FuturesIo::new(stream);
                if let Err(err) = http1::Builder::new().serve_connection(io, serve).await {
                    log::error!("connection error with {peer}: {err}");
                }
            };

            ex.spawn(task).detach();
        }
    };

    let (stop, stopped) = async_channel::bounded::<()>(1);
    thread::scope(|s| {
        for _ in 1..config.threads.get() {
            let ex = &ex;
            let stopped = stopped.clone();
            s.spawn(move || {
                future::block_on(ex.run(async move {
                    _ = stopped.recv().await;
                }));
            });
        }

        let err = future::block_on(ex.run(run));
        stop.close();
        err
    })
}

/// A static response body with its content type.
#[derive(Clone, Copy)]
pub struct Page {
    content_type: &'static str,
    body: &'static [u8],
}

impl Page {
    pub const fn json(body: &'static str) -> Self {
        Self {
            content_type: "application/json",
            body: body.as_bytes(),
        }
    }

    /// Creates a `200 OK` response.
    pub fn respond(self) -> Response<Full<Bytes>> {
        use hyper::{header, http::HeaderValue};

        let mut res = Response::new(Full::new(Bytes::from_static(self.body)));
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );

        res
    }
}
