//! Document store adapter.
//!
//! Thin wrapper over a `mongodb::Database` exposing the three collections
//! the service uses. No transactions and no uniqueness constraints beyond
//! the generated `_id`; every operation is a single round-trip and any
//! driver error surfaces to the handler as a 500.

use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Client, Collection, Database,
};

use crate::{
    error::AppError,
    types::{Board, Line, Postit},
};

#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connects and pings once at startup; an unreachable store aborts the
    /// process rather than limping along.
    pub async fn connect(url: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;
        Ok(Self { db })
    }

    pub fn boards(&self) -> Collection<Board> {
        self.db.collection("boards")
    }

    /// Reserved for the drawing feature; nothing writes lines yet.
    pub fn lines(&self) -> Collection<Line> {
        self.db.collection("lines")
    }

    pub fn postits(&self) -> Collection<Postit> {
        self.db.collection("postits")
    }

    pub async fn all_boards(&self) -> Result<Vec<Board>, AppError> {
        let cursor = self.boards().find(Document::new()).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn board_by_id(&self, id: &str) -> Result<Option<Board>, AppError> {
        Ok(self.boards().find_one(doc! { "_id": id }).await?)
    }

    pub async fn insert_board(&self, board: &Board) -> Result<(), AppError> {
        self.boards().insert_one(board).await?;
        Ok(())
    }

    pub async fn postits_for_board(&self, board_id: &str) -> Result<Vec<Postit>, AppError> {
        let cursor = self.postits().find(doc! { "board_id": board_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn insert_postit(&self, postit: &Postit) -> Result<(), AppError> {
        self.postits().insert_one(postit).await?;
        Ok(())
    }
}
