use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use skyfare_api::{app, AppState};
use skyfare_store::Config;
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(&Config::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

#[tokio::test]
async fn test_flights_requires_route_and_date() {
    let app = test_app();

    for uri in [
        "/api/flights",
        "/api/flights?fly_from=TUN&fly_to=CDG",
        "/api/flights?fly_from=&fly_to=CDG&date_from=25/12/2025",
        "/api/flights?fly_from=TUN&fly_to=CDG&date_from=not-a-date",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({ "data": [] }));
    }
}

#[tokio::test]
async fn test_flights_one_way_tun_cdg() {
    let app = test_app();
    let (status, body) = get(&app, "/api/flights?fly_from=TUN&fly_to=CDG&date_from=25/12/2025").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["cityFrom"], "Tunis");
    assert_eq!(data[0]["cityTo"], "Paris");
    assert_eq!(data[0]["duration"], 14_400);
    assert_eq!(data[0]["dTime"], 1_766_620_800i64 + 8 * 3600);
    let price = data[0]["price"].as_u64().unwrap();
    assert!((150..=549).contains(&price));
}

#[tokio::test]
async fn test_flights_round_trip_with_passengers() {
    let app = test_app();
    let (status, body) = get(
        &app,
        "/api/flights?fly_from=LHR&fly_to=IST&date_from=2026-03-01&date_to=08/03/2026&passengers=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[1]["cityFrom"], data[0]["cityTo"]);
    assert_eq!(data[1]["cityTo"], data[0]["cityFrom"]);
    for leg in data {
        assert_eq!(leg["price"].as_u64().unwrap() % 3, 0);
    }
}

#[tokio::test]
async fn test_flights_unknown_airport_is_empty() {
    let app = test_app();
    let (status, body) = get(&app, "/api/flights?fly_from=TUN&fly_to=XXX&date_from=25/12/2025").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_airport_suggestions() {
    let app = test_app();

    let (_, body) = get(&app, "/api/airports?q=am").await;
    let codes: Vec<&str> = body["data"].as_array().unwrap().iter().map(|a| a["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["FRA", "AMS"]);

    let (_, body) = get(&app, "/api/airports").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_search_reports_first_form_error() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/search",
        json!({ "origin": "", "destination": "CDG", "departingDate": "2026-07-01" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Please enter a valid origin code.");

    let (status, body) = post(
        &app,
        "/api/search",
        json!({ "origin": "TUN", "destination": "CDG", "departingDate": "2026-07-10", "returnDate": "2026-07-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Return date must be after departure.");
}

#[tokio::test]
async fn test_search_then_calendar() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/search",
        json!({
            "origin": "tun",
            "destination": "CDG",
            "departingDate": "2030-07-01",
            "returnDate": "2030-07-09",
            "passengers": { "adults": 2, "children": 1 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights"].as_array().unwrap().len(), 2);
    let calendar_query = body["calendarQuery"].as_str().unwrap();
    assert_eq!(calendar_query, "from=TUN&to=CDG&depart=2030-07-01&ret=2030-07-09&pax=2A0Y1C0I");

    let (status, cal) = get(&app, &format!("/api/calendar?{}", calendar_query)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cal["origin"]["city"], "Tunis");
    assert_eq!(cal["outbound"].as_array().unwrap().len(), 10);
    assert_eq!(cal["outbound"][0]["date"], "2030-06-29");
    assert_eq!(cal["outbound"][2]["selected"], true);
    assert_eq!(cal["inbound"].as_array().unwrap().len(), 10);
    assert_eq!(cal["passengers"]["total"], 3);
    assert_eq!(cal["canContinue"], true);
}

#[tokio::test]
async fn test_calendar_rejects_bad_input() {
    let app = test_app();

    let (status, _) = get(&app, "/api/calendar?from=TUN&to=CDG").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/calendar?depart=2030-07-01&pick_ret=2030-07-02").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "This search has no return leg");
}

#[tokio::test]
async fn test_calendar_rejects_out_of_range_years() {
    let app = test_app();

    for uri in [
        "/api/calendar?depart=%2B262142-12-31",
        "/api/calendar?depart=01/01/-262143",
        "/api/calendar?depart=2030-07-01&ret=%2B262142-12-31",
    ] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_huge_passenger_counts_do_not_overflow() {
    let app = test_app();

    let (status, cal) = get(&app, "/api/calendar?depart=2030-12-01&pax=4294967295A1Y").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cal["passengers"]["total"], 10);

    let (status, body) = post(
        &app,
        "/api/search",
        json!({
            "origin": "TUN",
            "destination": "CDG",
            "departingDate": "2030-07-01",
            "isReturn": false,
            "passengers": { "adults": 4294967295u32, "youths": 1 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flights"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deals_default_filter() {
    let app = test_app();
    let (status, body) = get(&app, "/api/deals").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"]["sort"], "Top Deal");
    for deal in body["data"].as_array().unwrap() {
        assert_eq!(deal["type"], "Round-Trip");
        assert_eq!(deal["month"], "August");
        assert!(deal["bookingQuery"].as_str().unwrap().starts_with("title="));
    }
}

#[tokio::test]
async fn test_deals_sorted_by_price() {
    let app = test_app();
    let (status, body) = get(&app, "/api/deals?type=All&month=All&region=Tous&sort=Price").await;

    assert_eq!(status, StatusCode::OK);
    let prices: Vec<u64> = body["data"].as_array().unwrap().iter().map(|d| d["price"].as_u64().unwrap()).collect();
    assert_eq!(prices.len(), 30);
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    let (status, body) = get(&app, "/api/deals?region=Asia").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown region option: Asia");
}

#[tokio::test]
async fn test_featured_deals() {
    let app = test_app();
    let (status, body) = get(&app, "/api/deals/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"][0]["title"], "Tunis → France");
}

#[tokio::test]
async fn test_deal_booking_flow() {
    let app = test_app();

    let (status, flow) = send(
        &app,
        Method::POST,
        "/api/bookings/deal?title=DJERBA%28DJE%29+%E2%86%92+NICE&price=512000&last=01%2F08%2F2026",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(flow["step"], "seat");
    assert_eq!(flow["selection"]["kind"], "deal");
    assert_eq!(flow["canAdvance"], false);
    let actions = format!("/api/bookings/{}/actions", flow["id"].as_str().unwrap());

    // Next stays disabled until a seat is picked
    let (status, _) = post(&app, &actions, json!({ "action": "next" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, flow) = post(&app, &actions, json!({ "action": "select_seat", "seat": "A14" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["seat"], "A14");
    assert_eq!(flow["canAdvance"], true);

    let (_, flow) = post(&app, &actions, json!({ "action": "next" })).await;
    assert_eq!(flow["step"], "details");
    assert_eq!(flow["passengers"].as_array().unwrap().len(), 1);

    // Blank passenger: silently stays on details
    let (status, flow) = post(&app, &actions, json!({ "action": "submit" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "details");
    assert!(flow["confirmation"].is_null());

    let (_, flow) = post(
        &app,
        &actions,
        json!({
            "action": "update_passenger",
            "index": 0,
            "patch": { "firstName": "Ines", "lastName": "Mansour", "dob": "1993-02-17" }
        }),
    )
    .await;
    assert_eq!(flow["canSubmit"], true);

    let (status, flow) = post(&app, &actions, json!({ "action": "submit" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "done");
    let code = flow["confirmation"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

#[tokio::test]
async fn test_flight_booking_rejects_bad_input() {
    let app = test_app();
    let (_, flights) = get(&app, "/api/flights?fly_from=DXB&fly_to=JFK&date_from=01/09/2026").await;

    let (status, flow) = post(&app, "/api/bookings", json!({ "flights": flights["data"] })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(flow["step"], "list");
    let actions = format!("/api/bookings/{}/actions", flow["id"].as_str().unwrap());

    let (status, _) = post(
        &app,
        &actions,
        json!({ "action": "select_flight", "flight_id": "00000000-0000-0000-0000-000000000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let flight_id = flights["data"][0]["id"].clone();
    let (status, flow) = post(&app, &actions, json!({ "action": "select_flight", "flight_id": flight_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["step"], "seat");
    assert_eq!(flow["selection"]["cityFrom"], "Dubai");

    let (status, _) = post(&app, &actions, json!({ "action": "select_seat", "seat": "A31" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/api/bookings", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_booking_session_lifecycle() {
    let app = test_app();

    let (status, body) = get(&app, "/api/bookings/6f1c2f7e-3c1b-4f6e-9a39-0b7c5d8e2a10").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (_, flow) = post(&app, "/api/bookings", json!({ "deal": { "title": "Deal", "image": "", "price": 0, "last": "" } })).await;
    let uri = format!("/api/bookings/{}", flow["id"].as_str().unwrap());

    let (status, fetched) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], flow["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seat_map() {
    let app = test_app();
    let (status, body) = get(&app, "/api/seats").await;
    assert_eq!(status, StatusCode::OK);
    let seats = body["data"].as_array().unwrap();
    assert_eq!(seats.len(), 30);
    assert_eq!(seats[0], "A1");
    assert_eq!(seats[29], "A30");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_actions_on_one_booking() {
    let app = test_app();

    let (_, flow) = send(&app, Method::POST, "/api/bookings/deal?title=Tunis&price=300", None).await;
    let id = flow["id"].as_str().unwrap().to_string();
    let actions = format!("/api/bookings/{}/actions", id);
    post(&app, &actions, json!({ "action": "select_seat", "seat": "A3" })).await;
    post(&app, &actions, json!({ "action": "next" })).await;

    let requests = (0..12).map(|_| {
        let app = app.clone();
        let actions = actions.clone();
        tokio::spawn(async move { post(&app, &actions, json!({ "action": "add_passenger" })).await.0 })
    });
    for request in requests.collect::<Vec<_>>() {
        assert_eq!(request.await.unwrap(), StatusCode::OK);
    }

    let (status, flow) = get(&app, &format!("/api/bookings/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flow["passengers"].as_array().unwrap().len(), 13);
}
