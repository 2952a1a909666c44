/*
 *  idp-core - Multi-tenant OpenID Connect identity provider
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

mod common;

use chrono::Utc;
use common::{CONFIDENTIAL_CLIENT, PROJECT, PUBLIC_CLIENT, REDIRECT_URI, USER_NAME, USER_PASSWORD};
use idp_core::error::Code;
use idp_core::oidc::authorize::{self, AuthorizeParams};
use idp_core::oidc::login::{self, LoginOutcome};
use idp_core::oidc::token_endpoint::{self, TokenRequest};
use idp_core::oidc::{discovery, issue, revoke, userinfo};

const BASE_URL: &str = "https://idp.example/api/v1";
const SSO_EXPIRES_IN: i64 = 3600;

#[tokio::test]
async fn discovery_document_lists_enabled_grant_types() {
    let (store, _) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let doc = discovery::discovery_document(&project, BASE_URL);
    assert_eq!(doc.issuer, format!("{BASE_URL}/project/{PROJECT}"));
    assert!(doc.grant_types_supported.contains(&"password"));
    assert!(doc.grant_types_supported.contains(&"authorization_code"));
    assert_eq!(doc.id_token_signing_alg_values_supported, vec!["RS256"]);
}

#[tokio::test]
async fn password_grant_issues_access_and_refresh_tokens() {
    let (store, _user_id) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let now = Utc::now();

    let request = TokenRequest {
        grant_type: "password".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        username: Some(USER_NAME.to_string()),
        password: Some(USER_PASSWORD.to_string()),
        ..Default::default()
    };
    let response = token_endpoint::handle_token_request(&store, &project, BASE_URL, request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert!(response.refresh_token.is_some());
    assert!(response.id_token.is_none());

    let info = userinfo::userinfo(&store, &project, BASE_URL, &response.access_token).await.unwrap();
    assert_eq!(info.preferred_username, USER_NAME);
}

#[tokio::test]
async fn password_grant_rejects_wrong_password() {
    let (store, _) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let request = TokenRequest {
        grant_type: "password".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        username: Some(USER_NAME.to_string()),
        password: Some("wrong-password".to_string()),
        ..Default::default()
    };
    let err = token_endpoint::handle_token_request(&store, &project, BASE_URL, request, None, SSO_EXPIRES_IN, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.code(), &Code::RequestUnauthorized);
}

#[tokio::test]
async fn authorization_code_flow_round_trips_and_rejects_double_redemption() {
    let (store, _user_id) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let now = Utc::now();

    let params = AuthorizeParams {
        scope: "openid".to_string(),
        response_type: "code".to_string(),
        client_id: PUBLIC_CLIENT.to_string(),
        redirect_uri: format!("{REDIRECT_URI}/landing"),
        ..Default::default()
    };
    let session = authorize::start_authorization(&store, PROJECT, params, 300, now).await.unwrap();

    let outcome = login::process_login(&store, &project, session.session_id, USER_NAME, USER_PASSWORD, now)
        .await
        .unwrap();
    let mut session = match outcome {
        LoginOutcome::ReadyToIssue(session) => session,
        _ => panic!("expected ReadyToIssue"),
    };

    let redirect = issue::issue_redirect(&store, &project, BASE_URL, &mut session, now).await.unwrap();
    let code = redirect
        .split("code=")
        .nth(1)
        .and_then(|tail| tail.split('&').next())
        .expect("redirect should carry an authorization code");

    let request = TokenRequest {
        grant_type: "authorization_code".to_string(),
        client_id: Some(PUBLIC_CLIENT.to_string()),
        code: Some(code.to_string()),
        redirect_uri: Some(format!("{REDIRECT_URI}/landing")),
        ..Default::default()
    };
    let response = token_endpoint::handle_token_request(&store, &project, BASE_URL, request.clone(), None, SSO_EXPIRES_IN, now)
        .await
        .unwrap();
    assert!(response.refresh_token.is_some());

    let replay = token_endpoint::handle_token_request(&store, &project, BASE_URL, request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap_err();
    assert_eq!(replay.code(), &Code::InvalidGrant);
}

#[tokio::test]
async fn refresh_token_rotates_session_and_old_token_is_rejected() {
    let (store, _) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let now = Utc::now();

    let password_request = TokenRequest {
        grant_type: "password".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        username: Some(USER_NAME.to_string()),
        password: Some(USER_PASSWORD.to_string()),
        ..Default::default()
    };
    let first = token_endpoint::handle_token_request(&store, &project, BASE_URL, password_request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap();
    let refresh_token = first.refresh_token.unwrap();

    let refresh_request = TokenRequest {
        grant_type: "refresh_token".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        refresh_token: Some(refresh_token.clone()),
        ..Default::default()
    };
    let second = token_endpoint::handle_token_request(&store, &project, BASE_URL, refresh_request.clone(), None, SSO_EXPIRES_IN, now)
        .await
        .unwrap();
    assert_ne!(second.access_token, first.access_token);

    let reuse = token_endpoint::handle_token_request(&store, &project, BASE_URL, refresh_request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap_err();
    assert_eq!(reuse.code(), &Code::InvalidRequest);
}

#[tokio::test]
async fn revoke_then_refresh_fails() {
    let (store, _) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let now = Utc::now();

    let password_request = TokenRequest {
        grant_type: "password".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        username: Some(USER_NAME.to_string()),
        password: Some(USER_PASSWORD.to_string()),
        ..Default::default()
    };
    let issued = token_endpoint::handle_token_request(&store, &project, BASE_URL, password_request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap();
    let refresh_token = issued.refresh_token.unwrap();

    revoke::revoke(&store, &project, BASE_URL, &refresh_token, None).await.unwrap();

    let refresh_request = TokenRequest {
        grant_type: "refresh_token".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        refresh_token: Some(refresh_token),
        ..Default::default()
    };
    let err = token_endpoint::handle_token_request(&store, &project, BASE_URL, refresh_request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap_err();
    assert_eq!(err.code(), &Code::InvalidRequest);
}

#[tokio::test]
async fn repeated_bad_passwords_lock_the_account() {
    let (store, _) = common::setup().await;
    let project = store.projects.get(PROJECT).await.unwrap();
    let now = Utc::now();

    for _ in 0..3 {
        let request = TokenRequest {
            grant_type: "password".to_string(),
            client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
            client_secret: Some("s3cr3t".to_string()),
            username: Some(USER_NAME.to_string()),
            password: Some("wrong-password".to_string()),
            ..Default::default()
        };
        let _ = token_endpoint::handle_token_request(&store, &project, BASE_URL, request, None, SSO_EXPIRES_IN, now).await;
    }

    let correct_request = TokenRequest {
        grant_type: "password".to_string(),
        client_id: Some(CONFIDENTIAL_CLIENT.to_string()),
        client_secret: Some("s3cr3t".to_string()),
        username: Some(USER_NAME.to_string()),
        password: Some(USER_PASSWORD.to_string()),
        ..Default::default()
    };
    let err = token_endpoint::handle_token_request(&store, &project, BASE_URL, correct_request, None, SSO_EXPIRES_IN, now)
        .await
        .unwrap_err();
    assert_eq!(err.code(), &Code::RequestUnauthorized, "account should be locked even with the right password");
}
