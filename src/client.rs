use std::fmt;
use std::time::Instant;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::categories::{INFO_URL, QUERY_URL, is_http_url};
use crate::error::{Error, Result};
use crate::query::{QueryRequest, QuerySpec};

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub query_url: String,
    pub info_url: String,
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            query_url: QUERY_URL.to_string(),
            info_url: INFO_URL.to_string(),
            verify_tls: true,
            user_agent: concat!("admie-opendata-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking GET of a whole body.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// reqwest-backed transport. Redirects are followed and non-2xx statuses are errors.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&opts.user_agent)
                .map_err(|_| Error::Usage(format!("invalid user agent: {}", opts.user_agent)))?,
        );

        let mut builder = HttpClient::builder().default_headers(headers);
        if !opts.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(Self { http: builder.build()? })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Vec<u8>> {
        let mut resp = self.http.get(url.clone()).send()?.error_for_status()?;
        let mut buf = Vec::new();
        resp.copy_to(&mut buf)?;
        Ok(buf)
    }
}

/// One downloadable file from a catalog response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileDescriptor {
    #[serde(rename = "file_path")]
    pub url: String,
    #[serde(rename = "file_description")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocaleInfo {
    #[serde(default)]
    pub time_gate: Option<String>,
    #[serde(default)]
    pub publication_frequency: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
}

/// Metadata for one file category, as returned by the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryInfo {
    pub filetype: String,
    #[serde(rename = "EN", default)]
    pub en: Vec<LocaleInfo>,
    #[serde(rename = "GR", default)]
    pub gr: Vec<LocaleInfo>,
}

impl fmt::Display for CategoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let en = self.en.first().cloned().unwrap_or_default();
        let gr = self.gr.first().cloned().unwrap_or_default();
        let s = |v: &Option<String>| v.clone().unwrap_or_default();

        writeln!(f, "* type: \"{}\"", self.filetype)?;
        writeln!(
            f,
            "   - description: {} {} / {} {}",
            s(&gr.publication_frequency),
            s(&gr.data_type),
            s(&en.publication_frequency),
            s(&en.data_type)
        )?;
        write!(f, "   - when: {}", s(&en.time_gate))
    }
}

/// What a catalog request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    /// Display-only listing; never recorded in the ledger.
    Categories(Vec<CategoryInfo>),
    Files { url: Url, files: Vec<FileDescriptor> },
}

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    query_url: Url,
    info_url: Url,
    transport: T,
}

impl Client<HttpTransport> {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        let transport = HttpTransport::new(&opts)?;
        Self::with_transport(opts, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(opts: ClientOptions, transport: T) -> Result<Self> {
        for u in [&opts.query_url, &opts.info_url] {
            if !is_http_url(u) {
                return Err(Error::Usage(format!("endpoint must be an http(s) url: {u}")));
            }
        }
        let query_url = Url::parse(&opts.query_url)?;
        let info_url = Url::parse(&opts.info_url)?;
        Ok(Self {
            query_url,
            info_url,
            transport,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request against the catalog.
    ///
    /// Any transport or decoding failure is reported as `CatalogUnavailable`.
    pub fn execute(&self, request: &QueryRequest) -> Result<CatalogOutcome> {
        match request {
            QueryRequest::ListCategories => Ok(CatalogOutcome::Categories(self.categories()?)),
            QueryRequest::Download(spec) => {
                let url = self.query_url_for(spec);
                let files = self.query(&url)?;
                Ok(CatalogOutcome::Files { url, files })
            }
        }
    }

    pub fn query_url_for(&self, spec: &QuerySpec) -> Url {
        let mut url = self.query_url.clone();
        url.query_pairs_mut().extend_pairs(spec.params());
        url
    }

    /// An empty array is a valid "nothing matches" answer. Entries without
    /// `file_path`/`file_description` are skipped.
    fn query(&self, url: &Url) -> Result<Vec<FileDescriptor>> {
        let started = Instant::now();
        let body = self
            .transport
            .get(url)
            .map_err(|e| Error::CatalogUnavailable(format!("{url}: {e}")))?;
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&body)
            .map_err(|e| Error::CatalogUnavailable(format!("{url}: unexpected response: {e}")))?;

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<FileDescriptor>(entry) {
                Ok(fd) => files.push(fd),
                Err(e) => warn!("skipping catalog entry: {e}"),
            }
        }
        debug!(
            "catalog query {url} returned {} files in {:?}",
            files.len(),
            started.elapsed()
        );
        Ok(files)
    }

    pub fn categories(&self) -> Result<Vec<CategoryInfo>> {
        let url = &self.info_url;
        let body = self
            .transport
            .get(url)
            .map_err(|e| Error::CatalogUnavailable(format!("{url}: {e}")))?;
        serde_json::from_slice(&body)
            .map_err(|e| Error::CatalogUnavailable(format!("{url}: unexpected response: {e}")))
    }

    /// Fetch a remote file body.
    pub fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        self.transport.get(url)
    }
}
