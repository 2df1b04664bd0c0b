use {
    helpers::serv::Page,
    http_body_util::Full,
    hyper::{
        Method, Request, Response, StatusCode,
        body::Bytes,
        header,
        http::HeaderValue,
    },
    lcgen::{Error, ErrorKind, Params},
    serde::{Deserialize, de::DeserializeOwned},
    std::{collections::BTreeMap, fmt},
};

const HEALTH: Page = Page::json(r#"{"status": "ok"}"#);

const ROUTES: [&str; 3] = ["/generate", "/analyze", "/health"];

/// Produces the encoded image for the generate route.
pub(crate) trait Render {
    fn render(&self, params: &Params) -> Result<Vec<u8>, Error>;
}

/// Renders png images with the linear congruential generator.
pub(crate) struct Png;

impl Render for Png {
    fn render(&self, params: &Params) -> Result<Vec<u8>, Error> {
        lcgen::render(params)
    }
}

#[derive(Deserialize)]
struct GenerateQuery {
    a: i64,
    c: i64,
    m: i64,
    #[serde(default = "default_size")]
    size: i64,
}

fn default_size() -> i64 {
    i64::from(lcgen::DEFAULT_SIZE)
}

#[derive(Deserialize)]
struct AnalyzeQuery {
    a: i64,
    c: i64,
    m: i64,
}

/// Handles a request and returns the response with permissive cors headers.
pub(crate) fn respond<B, R>(req: &Request<B>, render: &R) -> Response<Full<Bytes>>
where
    R: Render,
{
    let res = match route(req, render) {
        Ok(res) => res,
        Err(failure) => {
            let status = failure.status();
            if status.is_server_error() {
                log::error!("{} {}: {status} {failure}", req.method(), req.uri());
            } else {
                log::warn!("{} {}: {status} {failure}", req.method(), req.uri());
            }

            failure.respond()
        }
    };

    allow_cors(res)
}

fn route<B, R>(req: &Request<B>, render: &R) -> Result<Response<Full<Bytes>>, Failure>
where
    R: Render,
{
    let query = req.uri().query().unwrap_or_default();
    match (req.method(), req.uri().path()) {
        (&Method::OPTIONS, _) => Ok(preflight()),
        (&Method::GET, "/generate") => generate(query, render),
        (&Method::GET, "/analyze") => analyze(query),
        (&Method::GET, "/health") => Ok(HEALTH.respond()),
        (_, path) if ROUTES.contains(&path) => Err(Failure::MethodNotAllowed),
        _ => Err(Failure::NotFound),
    }
}

fn generate<R>(query: &str, render: &R) -> Result<Response<Full<Bytes>>, Failure>
where
    R: Render,
{
    let GenerateQuery { a, c, m, size } = parse_query(query)?;
    if size > i64::from(lcgen::MAX_SIZE) {
        return Err(Failure::Lcg(Error::SizeTooLarge { size }));
    }

    let png = render.render(&Params { a, c, m, size })?;
    Ok(content(png, "image/png"))
}

fn analyze(query: &str) -> Result<Response<Full<Bytes>>, Failure> {
    let AnalyzeQuery { a, c, m } = parse_query(query)?;
    let analysis = lcgen::analyze(a, c, m)?;
    let json = serde_json::to_vec(&analysis).map_err(Failure::Json)?;
    Ok(content(json, "application/json"))
}

/// Decodes the query, the last value of a repeated key wins.
fn parse_query<T>(query: &str) -> Result<T, Failure>
where
    T: DeserializeOwned,
{
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
    let last: BTreeMap<_, _> = pairs.into_iter().collect();
    let query = serde_urlencoded::to_string(&last).map_err(Failure::QueryEncoding)?;
    Ok(serde_urlencoded::from_str(&query)?)
}

fn content(body: Vec<u8>, content_type: &'static str) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from(body)));
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );

    res
}

fn preflight() -> Response<Full<Bytes>> {
    let mut res = Response::default();
    *res.status_mut() = StatusCode::NO_CONTENT;
    res
}

fn allow_cors(mut res: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let any = HeaderValue::from_static("*");
    let headers = res.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any);
    res
}

/// A request failure mapped to an error response.
#[derive(Debug)]
enum Failure {
    Query(serde_urlencoded::de::Error),
    QueryEncoding(serde_urlencoded::ser::Error),
    Lcg(Error),
    Json(serde_json::Error),
    MethodNotAllowed,
    NotFound,
}

impl Failure {
    fn status(&self) -> StatusCode {
        match self {
            Self::Query(_) => StatusCode::BAD_REQUEST,
            Self::Lcg(err) => match err.kind() {
                ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
                ErrorKind::Arithmetic | ErrorKind::Encoding => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::QueryEncoding(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn respond(&self) -> Response<Full<Bytes>> {
        let detail = serde_json::json!({ "detail": self.to_string() });
        let mut res = content(detail.to_string().into_bytes(), "application/json");
        *res.status_mut() = self.status();
        if let Self::MethodNotAllowed = self {
            res.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, OPTIONS"));
        }

        res
    }
}

impl From<serde_urlencoded::de::Error> for Failure {
    fn from(v: serde_urlencoded::de::Error) -> Self {
        Self::Query(v)
    }
}

impl From<Error> for Failure {
    fn from(v: Error) -> Self {
        Self::Lcg(v)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(err) => write!(f, "invalid parameter: {err}"),
            Self::Lcg(err) => write!(f, "{kind}: {err}", kind = err.kind()),
            Self::QueryEncoding(err) => write!(f, "failed to encode query: {err}"),
            Self::Json(err) => write!(f, "failed to serialize response: {err}"),
            Self::MethodNotAllowed => write!(f, "method not allowed"),
            Self::NotFound => write!(f, "not found"),
        }
    }
}
