use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use joinai_auth::{
    create_hmac_headers_with, create_joinai_headers, create_joinai_headers_with, AuthError, Clock, FixedClock,
    FixedId, JoinAiHeaders,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

struct BrokenClock;

impl Clock for BrokenClock {
    fn unix_seconds(&self) -> joinai_auth::Result<u64> {
        Err(AuthError::Environment("clock unavailable".into()))
    }
}

fn csid_of(headers: &JoinAiHeaders) -> String {
    let json: serde_json::Value = serde_json::from_slice(&BASE64.decode(&headers.server_param).unwrap()).unwrap();
    json["csid"].as_str().unwrap().to_string()
}

#[test]
fn test_clock_failure_propagates() {
    let err = create_joinai_headers_with(&BrokenClock, &FixedId::new("x"), "abc", "secret", None).unwrap_err();
    assert!(matches!(err, AuthError::Environment(_)));

    let err = create_hmac_headers_with(&BrokenClock, "abc", "secret", "host").unwrap_err();
    assert!(matches!(err, AuthError::Environment(_)));
}

#[test]
fn test_concurrent_calls_produce_distinct_sessions() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..16)
                    .map(|_| create_joinai_headers("abc", "secret", Some("/myapp/chat")).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut csids = HashSet::new();
    for handle in handles {
        for headers in handle.join().unwrap() {
            assert!(csids.insert(csid_of(&headers)));
        }
    }
    assert_eq!(csids.len(), 128);
}

#[test]
fn test_sources_are_shareable() {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(1_700_000_000));
    let worker = {
        let clock = Arc::clone(&clock);
        thread::spawn(move || {
            create_joinai_headers_with(clock.as_ref(), &FixedId::new("id"), "abc", "secret", None).unwrap()
        })
    };
    let local = create_joinai_headers_with(clock.as_ref(), &FixedId::new("id"), "abc", "secret", None).unwrap();
    assert_eq!(worker.join().unwrap(), local);
}

#[test]
fn test_csid_layout_for_long_app_name() {
    let name = "a-very-long-application-name";
    let headers = create_joinai_headers("abc", "secret", Some(&format!("/{}/chat", name))).unwrap();
    let csid = csid_of(&headers);

    assert!(csid.starts_with(&format!("abc{}", name)));
    assert_eq!(csid.len(), 3 + name.len() + 36);
}
