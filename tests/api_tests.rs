//! Page endpoint tests, driving the router in-process

mod common;

use axum::http::StatusCode;

use common::{body_json, book_form, location, person_form, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new(10);
    let (status, body) = app.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.get_json("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_new_book_form() {
    let app = TestApp::new(10);
    let (status, body) = app.get_json("/books/new").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/add-new-book");
    assert_eq!(body["model"]["newBook"]["title"], "");
}

#[tokio::test]
async fn test_create_book_redirects_to_listing() {
    let app = TestApp::new(10);
    let response = app
        .request("POST", "/create-new-book", Some("title=Dune&author=Frank+Herbert&year=1965"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/books"));

    let (_, body) = app.get_json("/books").await;
    assert_eq!(body["model"]["totalItems"], 1);
    assert_eq!(body["model"]["books"][0]["title"], "Dune");
}

#[tokio::test]
async fn test_invalid_book_rerenders_form_without_saving() {
    let app = TestApp::new(10);
    let response = app
        .request("POST", "/create-new-book", Some("title=&author=F&year=1965"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["view"], "book/add-new-book");
    assert_eq!(body["model"]["newBook"]["author"], "F");
    assert!(body["model"]["errors"]["title"].is_array());
    assert!(body["model"]["errors"]["author"].is_array());

    assert!(app.state.services.books.get_all_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unbindable_form_is_bad_request() {
    let app = TestApp::new(10);
    let response = app
        .request("POST", "/create-new-book", Some("title=Dune&author=Frank&year=soon"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_info_shows_people_when_free_and_owner_when_taken() {
    let app = TestApp::new(10);
    let book = app.state.services.books.add_book(&book_form("Dune", "Frank Herbert")).await.unwrap();
    let person = app.state.services.people.add_person(&person_form("Paul Atreides")).await.unwrap();

    let (status, body) = app.get_json(&format!("/books/{}", book.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/book-info");
    assert_eq!(body["model"]["people"][0]["full_name"], "Paul Atreides");
    assert!(body["model"].get("owner").is_none());

    let response = app
        .request(
            "PATCH",
            &format!("/set-book-owner/{}", book.id),
            Some(&format!("person_id={}", person.id)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(format!("/books/{}", book.id).as_str()));

    let (_, body) = app.get_json(&format!("/books/{}", book.id)).await;
    assert_eq!(body["model"]["owner"]["id"], person.id);
    assert!(body["model"].get("people").is_none());
    assert_eq!(body["model"]["book"]["ownership"]["person_id"], person.id);

    let response = app
        .request("PATCH", &format!("/set-book-free/{}", book.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, body) = app.get_json(&format!("/books/{}", book.id)).await;
    assert!(body["model"]["book"]["ownership"].is_null());
    assert!(body["model"]["people"].is_array());
}

#[tokio::test]
async fn test_set_owner_accepts_id_field_and_rejects_unknown_person() {
    let app = TestApp::new(10);
    let book = app.state.services.books.add_book(&book_form("Dune", "Frank Herbert")).await.unwrap();

    let response = app
        .request("PATCH", &format!("/set-book-owner/{}", book.id), Some("id=77"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_missing_book_is_not_found() {
    let app = TestApp::new(10);
    let (status, body) = app.get_json("/books/12").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("12"));
}

#[tokio::test]
async fn test_edit_and_update_book() {
    let app = TestApp::new(10);
    let book = app.state.services.books.add_book(&book_form("Dune", "Frank Herbert")).await.unwrap();

    let (_, body) = app.get_json(&format!("/books/{}/edit", book.id)).await;
    assert_eq!(body["view"], "book/update-book");
    assert_eq!(body["model"]["id"], book.id);
    assert_eq!(body["model"]["book"]["title"], "Dune");
    assert!(body["model"]["book"].get("ownership").is_none());

    let response = app
        .request(
            "PATCH",
            &format!("/books/{}", book.id),
            Some("title=Children+of+Dune&author=Frank+Herbert&year=1976"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = app.state.services.books.get_book_by_id(book.id).await.unwrap();
    assert_eq!(updated.title, "Children of Dune");
    assert_eq!(updated.year, 1976);

    let response = app
        .request("PATCH", &format!("/books/{}", book.id), Some("title=&author=Frank+Herbert&year=1976"))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["view"], "book/update-book");
    assert_eq!(body["model"]["id"], book.id);
}

#[tokio::test]
async fn test_delete_book() {
    let app = TestApp::new(10);
    let book = app.state.services.books.add_book(&book_form("Dune", "Frank Herbert")).await.unwrap();

    let response = app.request("DELETE", &format!("/delete-book/{}", book.id), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/books"));

    let (status, _) = app.get_json(&format!("/books/{}", book.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_books() {
    let app = TestApp::new(10);
    for title in ["Dune", "Dubliners", "Emma"] {
        app.state.services.books.add_book(&book_form(title, "Author")).await.unwrap();
    }

    let (status, body) = app.get_json("/books/execute-searching?typedString=du").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/search-book");
    assert_eq!(body["model"]["books"].as_array().unwrap().len(), 2);

    let (status, body) = app.get_json("/books/execute-searching").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingParameter");
}

#[tokio::test]
async fn test_pagination_pages() {
    let app = TestApp::new(2);
    for title in ["A", "B", "C", "D", "E"] {
        app.state.services.books.add_book(&book_form(title, "Author")).await.unwrap();
    }

    let (status, body) = app.get_json("/books/page/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "book/books-pagination");
    assert_eq!(body["model"]["currentPage"], 3);
    assert_eq!(body["model"]["totalPages"], 3);
    assert_eq!(body["model"]["totalItems"], 5);
    assert_eq!(body["model"]["books"].as_array().unwrap().len(), 1);

    let (_, zero) = app.get_json("/books/page/0").await;
    let (_, first) = app.get_json("/books").await;
    assert_eq!(zero, first);

    let (status, _) = app.get_json("/books/page/-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_number_at_integer_limit_is_empty() {
    let app = TestApp::new(2);
    app.state.services.books.add_book(&book_form("A", "Author")).await.unwrap();

    let (status, body) = app.get_json("/books/page/9223372036854775807").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["model"]["books"].as_array().unwrap().is_empty());
    assert_eq!(body["model"]["totalItems"], 1);

    let (status, body) = app.get_json("/books/page/9223372036854775807/sort?sortDir=asc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["model"]["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sorted_pagination() {
    let app = TestApp::new(10);
    for title in ["B", "C", "A"] {
        app.state.services.books.add_book(&book_form(title, "Author")).await.unwrap();
    }

    let (status, body) = app.get_json("/books/page/1/sort?sortDir=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["sortDir"], "desc");
    assert_eq!(body["model"]["reverseSortDir"], "asc");
    assert_eq!(body["model"]["books"][0]["title"], "C");

    let (_, body) = app.get_json("/books?sortDir=asc").await;
    assert_eq!(body["model"]["reverseSortDir"], "desc");
    assert_eq!(body["model"]["books"][0]["title"], "A");
}

#[tokio::test]
async fn test_sorted_pagination_requires_direction() {
    let app = TestApp::new(10);

    let (status, body) = app.get_json("/books/page/1/sort").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MissingParameter");

    let (status, body) = app.get_json("/books/page/1/sort?sortDir=up").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_people_pages() {
    let app = TestApp::new(10);

    let response = app
        .request("POST", "/create-new-person", Some("full_name=Ada+Lovelace&year_of_birth=1915"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/people"));

    let (_, body) = app.get_json("/people").await;
    assert_eq!(body["view"], "people/all-people");
    let id = body["model"]["people"][0]["id"].as_i64().unwrap();

    let response = app
        .request("POST", "/create-new-person", Some("full_name=A&year_of_birth=1800"))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["view"], "people/add-new-person");
    assert_eq!(
        body["model"]["errors"]["year_of_birth"][0],
        "Year of birth should be between 1900 and 2100"
    );

    let response = app
        .request("PATCH", &format!("/people/{}", id), Some("full_name=Ada+King&year_of_birth=1915"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (_, body) = app.get_json(&format!("/people/{}/edit", id)).await;
    assert_eq!(body["view"], "people/update-person");
    assert_eq!(body["model"]["id"], id);
    assert_eq!(body["model"]["person"]["full_name"], "Ada King");
    assert!(body["model"]["person"].get("id").is_none());
}

#[tokio::test]
async fn test_person_info_lists_held_books_and_delete_frees_them() {
    let app = TestApp::new(10);
    let book = app.state.services.books.add_book(&book_form("Dune", "Frank Herbert")).await.unwrap();
    let person = app.state.services.people.add_person(&person_form("Paul Atreides")).await.unwrap();
    app.state.services.books.set_owner_for_book(book.id, person.id).await.unwrap();

    let (status, body) = app.get_json(&format!("/people/{}", person.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "people/person-info");
    assert_eq!(body["model"]["books"][0]["title"], "Dune");
    assert_eq!(body["model"]["books"][0]["overdue"], false);

    let response = app.request("DELETE", &format!("/delete-person/{}", person.id), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let book = app.state.services.books.get_book_by_id(book.id).await.unwrap();
    assert!(book.ownership.is_none());
}
