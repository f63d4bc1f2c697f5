use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqlxProjectRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxEntryRepo {
    pub pool: SqlitePool,
}

#[derive(Clone)]
pub struct SqlxPhotoRepo {
    pub pool: SqlitePool,
}
