use bucketform_cloud::{ResourceHandler, ResourceServer, StateValue};
use bucketform_cloud_aws::{BucketResource, Clock, DEFAULT_TYPE_NAME, MemoryBucketStore, S3Session};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tempfile::TempDir;

/// Manually advanced clock
#[derive(Clone)]
pub struct TestClock {
    secs: Arc<AtomicI64>,
}

impl TestClock {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Self {
            secs: Arc::new(AtomicI64::new(start.timestamp())),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn clock(&self) -> Clock {
        let secs = self.secs.clone();
        Arc::new(move || -> DateTime<Utc> {
            DateTime::from_timestamp(secs.load(Ordering::SeqCst), 0).unwrap()
        })
    }
}

/// Bucket resource wired to an in-memory store, as the host would see it
pub struct Harness {
    pub store: Arc<MemoryBucketStore>,
    pub clock: TestClock,
    pub bucket: ResourceServer<BucketResource>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryBucketStore::new());
        let clock = TestClock::new();
        let mut bucket = ResourceServer::new(
            DEFAULT_TYPE_NAME,
            BucketResource::new().with_clock(clock.clock()),
        );

        let data = S3Session::new(store.clone()).into_provider_data();
        let diags = bucket.configure(Some(&data));
        assert!(diags.is_empty(), "configure failed: {:?}", diags);

        Self {
            store,
            clock,
            bucket,
        }
    }
}

/// Host-side state store backed by a file
pub struct StateFile {
    dir: TempDir,
}

impl StateFile {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("terraform.tfstate.json")
    }

    /// Persist `state`, or remove the file when the resource is gone
    pub fn store(&self, state: Option<&StateValue>) {
        match state {
            Some(state) => fs::write(self.path(), state.to_json_string().unwrap()).unwrap(),
            None => {
                let _ = fs::remove_file(self.path());
            }
        }
    }

    pub fn raw(&self) -> Option<String> {
        fs::read_to_string(self.path()).ok()
    }

    pub fn load(&self) -> Option<StateValue> {
        self.raw()
            .map(|content| StateValue::new(serde_json::from_str(&content).unwrap()))
    }
}
