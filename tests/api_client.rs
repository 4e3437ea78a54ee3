// ============================================================================
// Tests d'intégration : BankingApi contre un serveur axum en mémoire
// ============================================================================
// Le serveur écoute sur 127.0.0.1:0 (port libre choisi par l'OS) et imite
// les réponses de l'API bancaire, y compris ses erreurs.
// ============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use lazybank::api::{ApiError, BankingApi, BankingBackend};
use lazybank::controller::{AppCommand, AppResult, Controller};
use lazybank::forms::FormKind;
use lazybank::models::{AccountType, TransactionRequest, TransactionType, TransferRequest};

#[derive(Clone, Default)]
struct Bank {
    /// Nombre de GET /accounts reçus
    list_calls: Arc<AtomicUsize>,
    /// Corps JSON des POST reçus
    posted: Arc<Mutex<Vec<Value>>>,
}

fn account_json(id: &str, customer_id: &str, currency: &str) -> Value {
    json!({
        "accountId": id,
        "customerId": customer_id,
        "accountType": "SAVINGS",
        "balance": 1234.5,
        "currency": currency,
        "active": true
    })
}

fn transaction_json(kind: &str, body: &Value) -> Value {
    json!({
        "transactionId": "tx-1",
        "accountId": body["accountId"].clone(),
        "type": kind,
        "amount": body["amount"].clone(),
        "currency": body["currency"].clone(),
        "description": body["description"].clone(),
        "timestamp": "2024-01-15T10:30:00",
        "relatedAccountId": null
    })
}

async fn list_accounts(State(bank): State<Bank>) -> Json<Value> {
    bank.list_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        account_json("0123456789abcdef", "CUST 1", "USD"),
        account_json("fedcba9876543210", "CUST-2", "EUR"),
    ]))
}

async fn customer_accounts(Path(customer_id): Path<String>) -> Json<Value> {
    if customer_id == "CUST 1" {
        Json(json!([account_json("0123456789abcdef", &customer_id, "USD")]))
    } else {
        Json(json!([]))
    }
}

async fn create_account(State(bank): State<Bank>, Json(body): Json<Value>) -> Json<Value> {
    bank.posted.lock().unwrap().push(body.clone());
    Json(json!({
        "accountId": "aaaabbbbccccdddd",
        "customerId": body["customerId"].clone(),
        "accountType": body["accountType"].clone(),
        "balance": body["initialBalance"].clone(),
        "currency": body["currency"].clone(),
        "active": true
    }))
}

/// Dépôt : refusé (400 + JSON "message") au-delà de 1000
async fn deposit(State(bank): State<Bank>, Json(body): Json<Value>) -> Response {
    bank.posted.lock().unwrap().push(body.clone());
    if body["amount"].as_f64().unwrap_or_default() > 1000.0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": 400, "message": "Amount exceeds deposit limit" })),
        )
            .into_response();
    }
    Json(transaction_json("DEPOSIT", &body)).into_response()
}

/// Retrait : erreur serveur en texte brut
async fn withdraw() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Virement : 404 sans corps
async fn transfer() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Historique : "broken" renvoie un corps 2xx qui n'est pas du JSON
async fn account_transactions(Path(account_id): Path<String>) -> Response {
    if account_id == "broken" {
        return "definitely not json".into_response();
    }
    Json(json!([{
        "transactionId": "tx-9",
        "accountId": "someone-else",
        "type": "TRANSFER",
        "amount": 75,
        "currency": "EUR",
        "description": "Rent",
        "timestamp": "2024-01-15T10:30:00",
        "relatedAccountId": account_id
    }]))
    .into_response()
}

/// Démarre le serveur et retourne (état partagé, URL de base)
async fn spawn_bank() -> (Bank, String) {
    let bank = Bank::default();

    let router = Router::new()
        .route("/api/accounts", get(list_accounts).post(create_account))
        .route("/api/accounts/customer/:customer_id", get(customer_accounts))
        .route("/api/transactions/deposit", post(deposit))
        .route("/api/transactions/withdraw", post(withdraw))
        .route("/api/transactions/transfer", post(transfer))
        .route("/api/transactions/account/:account_id", get(account_transactions))
        .with_state(bank.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (bank, format!("http://{}/api", addr))
}

fn deposit_request(amount: rust_decimal::Decimal) -> TransactionRequest {
    TransactionRequest {
        account_id: "fedcba9876543210".to_string(),
        amount,
        currency: "EUR".to_string(),
        description: "Salary".to_string(),
    }
}

#[tokio::test]
async fn test_list_accounts() {
    let (bank, base_url) = spawn_bank().await;
    let api = BankingApi::new(&base_url).unwrap();

    let accounts = api.list_accounts().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_type, AccountType::Savings);
    assert_eq!(accounts[0].balance, dec!(1234.5));
    assert_eq!(accounts[0].formatted_balance(), "$1,234.50");
    assert_eq!(accounts[1].currency, "EUR");
    assert_eq!(bank.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_customer_id_is_percent_encoded() {
    let (_, base_url) = spawn_bank().await;
    // Base avec "/" final : même résultat
    let api = BankingApi::new(&format!("{}/", base_url)).unwrap();

    let accounts = api.customer_accounts("CUST 1").await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].customer_id, "CUST 1");

    assert!(api.customer_accounts("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deposit_sends_json_numbers_and_currency() {
    let (bank, base_url) = spawn_bank().await;
    let api = BankingApi::new(&base_url).unwrap();

    let transaction = api.deposit(&deposit_request(dec!(10.5))).await.unwrap();
    assert_eq!(transaction.transaction_type, TransactionType::Deposit);
    assert_eq!(transaction.formatted_amount(), "€10.50");

    let posted = bank.posted.lock().unwrap();
    assert_eq!(posted[0]["accountId"], "fedcba9876543210");
    assert_eq!(posted[0]["amount"], json!(10.5));
    assert_eq!(posted[0]["currency"], "EUR");
    assert_eq!(posted[0]["description"], "Salary");
}

#[tokio::test]
async fn test_rejection_uses_json_message() {
    let (_, base_url) = spawn_bank().await;
    let api = BankingApi::new(&base_url).unwrap();

    let error = api.deposit(&deposit_request(dec!(5000))).await.unwrap_err();
    assert!(error.is_rejection());
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.to_string(), "Amount exceeds deposit limit");
}

#[tokio::test]
async fn test_rejection_falls_back_to_raw_text_then_status() {
    let (_, base_url) = spawn_bank().await;
    let api = BankingApi::new(&base_url).unwrap();

    let error = api.withdraw(&deposit_request(dec!(5))).await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "Internal Server Error");

    let error = api
        .transfer(&TransferRequest {
            from_account_id: "a".to_string(),
            to_account_id: "b".to_string(),
            amount: dec!(1),
            currency: "USD".to_string(),
            description: "Move".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_history_and_decode_error() {
    let (_, base_url) = spawn_bank().await;
    let api = BankingApi::new(&base_url).unwrap();

    let history = api.account_transactions("mine").await.unwrap();
    assert_eq!(history.len(), 1);
    // Virement entrant : crédit pour le compte consulté
    assert_eq!(history[0].direction("mine").sign(), '+');

    let error = api.account_transactions("broken").await.unwrap_err();
    assert!(matches!(error, ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_network_error() {
    // Port 1 : rien n'écoute, la connexion est refusée
    let api = BankingApi::new("http://127.0.0.1:1/api").unwrap();
    let error = api.list_accounts().await.unwrap_err();
    assert!(matches!(error, ApiError::Network(_)));
    assert!(!error.is_rejection());
}

#[test]
fn test_invalid_base_url() {
    assert!(matches!(
        BankingApi::new("not a url"),
        Err(ApiError::InvalidBaseUrl(_))
    ));
}

// ============================================================================
// Controller de bout en bout (HTTP réel)
// ============================================================================

#[tokio::test]
async fn test_successful_deposit_reloads_accounts_and_dashboard_once() {
    let (bank, base_url) = spawn_bank().await;
    let controller = Controller::new(BankingApi::new(&base_url).unwrap());

    let results = controller
        .execute(AppCommand::Deposit(deposit_request(dec!(10))))
        .await;

    assert_eq!(bank.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        results[0],
        AppResult::Submitted {
            form: FormKind::Deposit,
            message: "Deposit successful! Amount: €10.00".to_string(),
        }
    );
    assert!(matches!(results[1], AppResult::AccountsLoaded(ref a) if a.len() == 2));
    assert!(matches!(results[2], AppResult::DashboardLoaded(ref a) if a.len() == 2));
}

#[tokio::test]
async fn test_failed_deposit_does_not_reload() {
    let (bank, base_url) = spawn_bank().await;
    let controller = Controller::new(BankingApi::new(&base_url).unwrap());

    let results = controller
        .execute(AppCommand::Deposit(deposit_request(dec!(5000))))
        .await;

    assert_eq!(bank.list_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        results,
        vec![AppResult::Failed {
            form: Some(FormKind::Deposit),
            message: "Amount exceeds deposit limit".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_create_account_round_trip() {
    let (bank, base_url) = spawn_bank().await;
    let controller = Controller::new(BankingApi::new(&base_url).unwrap());

    let results = controller
        .execute(AppCommand::CreateAccount(lazybank::models::AccountCreateRequest {
            customer_id: "CUST-3".to_string(),
            account_type: AccountType::FixedDeposit,
            initial_balance: dec!(250),
            currency: "GBP".to_string(),
        }))
        .await;

    assert_eq!(
        results[0],
        AppResult::Submitted {
            form: FormKind::CreateAccount,
            message: "Account created successfully! Account: aaaa-bbbb-cccc-dddd".to_string(),
        }
    );

    let posted = bank.posted.lock().unwrap();
    assert_eq!(posted[0]["accountType"], "FIXED_DEPOSIT");
    assert_eq!(posted[0]["initialBalance"], json!(250.0));
    assert_eq!(posted[0]["currency"], "GBP");
}
