//! In-process z/OSMF stand-in shared by the integration tests.
//!
//! The mock keeps jobs and dataset content in memory so that calls made
//! through the SDK observe each other: a submitted job can be polled, an
//! uploaded dataset can be downloaded, listed and copied.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Once};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use zosmf_sdk::Profile;

/// Base path the mock serves under, as a gateway would.
pub const BASE_PATH: &str = "/api/v1";

pub const USER: &str = "IBMUSER";

static TRACING: Once = Once::new();

/// Route SDK logs to the test output, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Default)]
struct MockState {
    next_job: u32,
    /// Job ID to (job name, status).
    jobs: BTreeMap<String, (String, String)>,
    /// Dataset name to content.
    datasets: BTreeMap<String, String>,
}

type Shared = Arc<Mutex<MockState>>;

fn last_segment(request: &Request) -> String {
    request
        .url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}

/// `PUT /restjobs/jobs`: accepts the submission and queues the job.
struct SubmitJob(Shared);

impl Respond for SubmitJob {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400).set_body_string("body is not JSON"),
        };

        let job_name = body["jobStatement"]
            .as_str()
            .and_then(|jcl| jcl.trim_start_matches('/').split_whitespace().next())
            .unwrap_or("BATCH")
            .to_string();

        let mut state = self.0.lock().unwrap();
        state.next_job += 1;
        let job_id = format!("JOB{:05}", state.next_job);
        state
            .jobs
            .insert(job_id.clone(), (job_name.clone(), "INPUT".to_string()));

        ResponseTemplate::new(201).set_body_json(json!({
            "jobid": job_id,
            "jobname": job_name,
            "owner": USER,
            "status": "INPUT",
            "type": "JOB",
            "job-correlator": format!("J{}", job_id)
        }))
    }
}

/// `GET /restjobs/jobs/{id}`: a job reaches OUTPUT on its first poll.
struct JobStatus(Shared);

impl Respond for JobStatus {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let job_id = last_segment(request);
        let mut state = self.0.lock().unwrap();

        match state.jobs.get_mut(&job_id) {
            Some((name, status)) => {
                *status = "OUTPUT".to_string();
                ResponseTemplate::new(200).set_body_json(json!({
                    "jobid": job_id,
                    "jobname": name,
                    "owner": USER,
                    "status": status,
                    "retcode": "CC 0000"
                }))
            }
            None => ResponseTemplate::new(404).set_body_string(format!("job {} not found", job_id)),
        }
    }
}

/// `GET /restfiles/ds?dslevel=...`: lists stored datasets matching the
/// pattern's fixed prefix.
struct ListDatasets(Shared);

impl Respond for ListDatasets {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let pattern = request
            .url
            .query_pairs()
            .find(|(name, _)| name == "dslevel")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        let prefix = pattern.split('*').next().unwrap_or_default();
        let exact = !pattern.contains('*');

        let state = self.0.lock().unwrap();
        let items: Vec<Value> = state
            .datasets
            .keys()
            .filter(|name| if exact { **name == pattern } else { name.starts_with(prefix) })
            .map(|name| json!({"dsname": name, "dsorg": "PS", "recfm": "FB", "lrecl": "80"}))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "returnedRows": items.len(),
            "JSONversion": 1
        }))
    }
}

/// `PUT /restfiles/ds/{name}`: plain-text content replaces the dataset,
/// a JSON copy request duplicates the named source into it.
struct WriteDataset(Shared);

impl Respond for WriteDataset {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let target = last_segment(request);
        let is_json = request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        let mut state = self.0.lock().unwrap();
        if !is_json {
            let content = String::from_utf8_lossy(&request.body).into_owned();
            state.datasets.insert(target, content);
            return ResponseTemplate::new(204);
        }

        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let source = body["from-dataset"]["dsn"].as_str().unwrap_or_default();
        match state.datasets.get(source).cloned() {
            Some(content) if body["request"] == "copy" => {
                state.datasets.insert(target, content);
                ResponseTemplate::new(201)
            }
            Some(_) => ResponseTemplate::new(400).set_body_string("unsupported request"),
            None => ResponseTemplate::new(404).set_body_string(format!("{} not found", source)),
        }
    }
}

/// `GET /restfiles/ds/{name}`: returns stored content as text.
struct ReadDataset(Shared);

impl Respond for ReadDataset {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let name = last_segment(request);
        match self.0.lock().unwrap().datasets.get(&name) {
            Some(content) => ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string(content.clone()),
            None => ResponseTemplate::new(404).set_body_string(format!("{} not found", name)),
        }
    }
}

/// A running mock z/OSMF.
pub struct MockZosmf {
    pub server: MockServer,
}

impl MockZosmf {
    pub async fn start() -> Self {
        init_tracing();

        let server = MockServer::start().await;
        let state = Shared::default();

        Mock::given(method("PUT"))
            .and(path(format!("{}/restjobs/jobs", BASE_PATH)))
            .respond_with(SubmitJob(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^{}/restjobs/jobs/[^/]+$", BASE_PATH)))
            .respond_with(JobStatus(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/restfiles/ds", BASE_PATH)))
            .respond_with(ListDatasets(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path_regex(format!(r"^{}/restfiles/ds/[^/]+$", BASE_PATH)))
            .respond_with(WriteDataset(state.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^{}/restfiles/ds/[^/]+$", BASE_PATH)))
            .respond_with(ReadDataset(state))
            .mount(&server)
            .await;

        Self { server }
    }

    /// Profile pointing at the mock over plain HTTP.
    pub fn profile(&self) -> Profile {
        Profile::new("mock", "127.0.0.1", self.server.address().port(), USER, "secret")
            .with_protocol("http")
            .with_base_path(BASE_PATH)
    }

    /// Requests received so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}
