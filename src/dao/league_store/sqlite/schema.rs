/// Idempotent DDL applied every time the store connects, in order.
pub(super) const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id          TEXT PRIMARY KEY NOT NULL,
        name        TEXT NOT NULL,
        logo        TEXT,
        city        TEXT,
        created_at  INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS players (
        id       TEXT PRIMARY KEY NOT NULL,
        team_id  TEXT NOT NULL REFERENCES teams (id),
        name     TEXT NOT NULL,
        number   TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS players_team_idx ON players (team_id)",
    r#"
    CREATE TABLE IF NOT EXISTS games (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        team_a_id      TEXT NOT NULL,
        team_a_name    TEXT NOT NULL,
        team_b_id      TEXT NOT NULL,
        team_b_name    TEXT NOT NULL,
        final_score_a  INTEGER NOT NULL,
        final_score_b  INTEGER NOT NULL,
        period         INTEGER NOT NULL,
        status         TEXT NOT NULL CHECK (status IN ('completed', 'cancelled', 'suspended')),
        stats          TEXT,
        settings       TEXT,
        created_at     INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS game_history (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        game_id        INTEGER NOT NULL REFERENCES games (id),
        team           TEXT NOT NULL,
        player_name    TEXT,
        player_number  TEXT,
        delta          INTEGER NOT NULL,
        score_a        INTEGER NOT NULL,
        score_b        INTEGER NOT NULL,
        period         INTEGER NOT NULL CHECK (period >= 0),
        timestamp      INTEGER NOT NULL CHECK (timestamp >= 0)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS game_history_game_idx ON game_history (game_id, timestamp)",
    r#"
    CREATE TABLE IF NOT EXISTS sanctions (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        game_id        INTEGER NOT NULL REFERENCES games (id),
        team           TEXT NOT NULL,
        player_name    TEXT,
        player_number  TEXT,
        type           TEXT NOT NULL,
        period         INTEGER NOT NULL CHECK (period >= 0),
        timestamp      INTEGER NOT NULL CHECK (timestamp >= 0)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS sanctions_game_idx ON sanctions (game_id, timestamp)",
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        home_team_id  TEXT NOT NULL REFERENCES teams (id),
        away_team_id  TEXT NOT NULL REFERENCES teams (id),
        date_time     INTEGER NOT NULL
    )
    "#,
];
