use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use models::user::UserRole;
use service::auth::domain::{LoginInput, VerifiedIdentity};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::{AuthConfig, AuthService, SessionTokens, StaticIdentityVerifier};

fn bench_tokens(c: &mut Criterion) {
    let tokens = SessionTokens::new("bench-secret", Duration::from_secs(3600));
    let uid = uuid::Uuid::new_v4();
    let token = tokens.issue(uid, UserRole::Customer).unwrap();

    c.bench_function("session_token_issue", |b| {
        b.iter(|| tokens.issue(uid, UserRole::Customer).unwrap());
    });
    c.bench_function("session_token_verify", |b| {
        b.iter(|| tokens.verify(&token).unwrap());
    });
}

fn bench_login(c: &mut Criterion) {
    let verifier = StaticIdentityVerifier::new().with_identity(
        "bench",
        VerifiedIdentity { uid: "uid-bench".into(), email: Some("bench@example.com".into()), name: None, picture: None },
    );
    let svc = AuthService::new(
        Arc::new(MockAuthRepository::default()),
        Arc::new(verifier),
        SessionTokens::new("bench-secret", Duration::from_secs(3600)),
        AuthConfig::default(),
    );

    // first login creates the user outside of the measured loop
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.login(LoginInput { firebase_token: "bench".into(), role: None }));

    c.bench_function("auth_login_existing_user", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { firebase_token: "bench".into(), role: None })).unwrap();
        });
    });
}

criterion_group!(benches, bench_tokens, bench_login);
criterion_main!(benches);
