//! Repository contract tests, run against each backend

use todo_backend::repository::{InMemoryTodoRepository, PgTodoRepository};
use todo_backend::{State, Todo, TodoStore};

mod common;

#[tokio::test]
async fn test_in_memory_repository_contract() {
    let repo = InMemoryTodoRepository::new();
    common::repository_contract(&repo).await;
}

#[tokio::test]
async fn test_store_contract() {
    let store = TodoStore::in_memory();
    common::repository_contract(&store).await;
}

#[tokio::test]
async fn test_in_memory_create_find_delete_scenario() {
    use todo_backend::TodoRepository;

    let repo = InMemoryTodoRepository::new();
    let created = repo.create(Todo::draft("x").unwrap()).await.unwrap();

    assert_eq!(created.id().map(|id| id.value()), Some(1));
    assert_eq!(created.state(), State::NotCompleted);
    assert_eq!(repo.find_all().await.unwrap(), vec![created.clone()]);

    repo.delete(created.id().unwrap()).await.unwrap();
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at a Postgres database"]
async fn test_postgres_repository_contract() {
    let pool = common::setup_test_db().await;
    let repo = PgTodoRepository::new(pool);
    common::repository_contract(&repo).await;
}
