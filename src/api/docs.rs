//! OpenAPI document - GET /api-docs/openapi.json

use axum::response::Json;
use serde_json::{json, Map, Value};

pub async fn openapi() -> Json<Value> {
    Json(document())
}

fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Bookshelf API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            },
            "schemas": schemas(),
        },
        "paths": paths(),
    })
}

fn schemas() -> Value {
    let mut schemas = Map::new();
    schemas.insert(
        "Error".into(),
        json!({
            "type": "object",
            "properties": {
                "error": { "type": "string" },
                "message": { "type": "string" }
            }
        }),
    );
    schemas.insert(
        "Credentials".into(),
        json!({
            "type": "object",
            "required": ["username", "password"],
            "properties": {
                "username": { "type": "string" },
                "password": { "type": "string" }
            }
        }),
    );
    schemas.insert(
        "User".into(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" },
                "email": { "type": "string" },
                "role": { "type": "string" },
                "isActive": { "type": "boolean" },
                "hobbies": { "type": "array", "items": { "type": "string" } },
                "address": { "type": "object" },
                "createdAt": { "type": "string", "format": "date-time" }
            }
        }),
    );
    schemas.insert(
        "Book".into(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "title": { "type": "string" },
                "author": { "type": "string" },
                "publishedYear": { "type": "integer" }
            }
        }),
    );
    Value::Object(schemas)
}

fn responses(entries: &[(&str, &str)]) -> Value {
    let map = entries
        .iter()
        .map(|(status, description)| {
            (status.to_string(), json!({ "description": description }))
        })
        .collect::<Map<String, Value>>();
    Value::Object(map)
}

fn operation(summary: &str, protected: bool, entries: &[(&str, &str)]) -> Value {
    let mut op = json!({
        "summary": summary,
        "responses": responses(entries),
    });
    if protected {
        op["security"] = json!([{ "bearerAuth": [] }]);
    }
    op
}

fn paths() -> Value {
    const UNAUTHORIZED: (&str, &str) = ("401", "Missing, invalid or expired token");

    let mut login = operation(
        "Exchange credentials for a bearer token",
        false,
        &[
            ("200", "Signed token and its lifetime in seconds"),
            ("401", "Invalid username or password"),
        ],
    );
    login["requestBody"] = json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Credentials" } }
        }
    });

    let mut list_users = operation("List users", false, &[("200", "Users")]);
    list_users["parameters"] =
        json!([{ "name": "limit", "in": "query", "schema": { "type": "integer" } }]);

    json!({
        "/login": { "post": login },
        "/api/users": {
            "get": list_users,
            "post": operation(
                "Create a user",
                false,
                &[("201", "Created user"), ("400", "name, email, and role are required")],
            ),
        },
        "/api/users/{id}": {
            "get": operation("Get a user", false, &[("200", "User"), ("404", "User not found")]),
            "delete": operation("Delete a user", false, &[("200", "Deleted"), ("404", "User not found")]),
        },
        "/api/books": {
            "get": operation("List books", true, &[("200", "Books"), UNAUTHORIZED]),
            "post": operation(
                "Add a book",
                true,
                &[
                    ("201", "Created book"),
                    ("400", "title, author and publishedYear are required"),
                    UNAUTHORIZED,
                ],
            ),
        },
        "/api/books/{id}": {
            "get": operation(
                "Get a book",
                true,
                &[("200", "Book"), ("404", "Book not found"), UNAUTHORIZED],
            ),
        },
        "/api/auth/me": {
            "get": operation("The subject of the presented token", true, &[("200", "Subject id and username"), UNAUTHORIZED]),
        },
    })
}
