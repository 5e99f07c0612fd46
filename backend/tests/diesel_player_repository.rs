//! `DieselPlayerRepository` against embedded PostgreSQL: case-folded name
//! matching and leaderboard ordering.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hunt::domain::ports::{InsertOutcome, PlayerRepository};
use hunt::domain::{Player, PlayerId, PlayerName};
use hunt::outbound::persistence::DieselPlayerRepository;
use rstest::{fixture, rstest};

mod support;

use support::{HuntDatabase, hunt_database};

#[fixture]
fn database() -> Option<HuntDatabase> {
    hunt_database()
}

fn joined_at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0)
        .single()
        .expect("valid timestamp")
        + TimeDelta::minutes(offset_minutes)
}

fn player(name: &str, total_points: u32, offset_minutes: i64) -> Player {
    Player::new(
        PlayerId::random(),
        PlayerName::new(name).expect("valid name"),
        total_points,
        joined_at(offset_minutes),
    )
}

fn name(raw: &str) -> PlayerName {
    PlayerName::new(raw).expect("valid name")
}

#[rstest]
#[case("ana")]
#[case("ANA")]
#[case("  aNa ")]
fn lookup_ignores_case(database: Option<HuntDatabase>, #[case] query: &str) {
    let Some(db) = database else { return };
    let players = DieselPlayerRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let ana = player("Ana", 10, 0);
        players.insert(&ana).await.expect("insert");

        let found = players.find_by_name(&name(query)).await.expect("lookup");

        assert_eq!(found, Some(ana));
    });
}

#[rstest]
fn lookup_agrees_with_domain_folding_for_non_ascii(database: Option<HuntDatabase>) {
    let Some(db) = database else { return };
    let players = DieselPlayerRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let elodie = player("Élodie", 0, 0);
        players.insert(&elodie).await.expect("insert");

        let found = players
            .find_by_name(&name("éLODIE"))
            .await
            .expect("lookup");
        let clash = players
            .insert(&player("ÉLODIE", 0, 1))
            .await
            .expect("insert runs");

        assert_eq!(found.map(|p| p.id()), Some(elodie.id()));
        assert_eq!(clash, InsertOutcome::Conflict);
    });
}

#[rstest]
fn unknown_name_is_none(database: Option<HuntDatabase>) {
    let Some(db) = database else { return };
    let players = DieselPlayerRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        players.insert(&player("Ana", 0, 0)).await.expect("insert");
        let found = players.find_by_name(&name("Anabel")).await.expect("lookup");
        assert!(found.is_none());
    });
}

#[rstest]
fn case_variant_insert_conflicts(database: Option<HuntDatabase>) {
    let Some(db) = database else { return };
    let players = DieselPlayerRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let first = players.insert(&player("Bea", 0, 0)).await;
        let second = players.insert(&player("BEA", 0, 1)).await;

        assert_eq!(first, Ok(InsertOutcome::Created));
        assert_eq!(second, Ok(InsertOutcome::Conflict));
    });
}

#[rstest]
fn list_top_orders_by_points_then_join_time(database: Option<HuntDatabase>) {
    let Some(db) = database else { return };
    let players = DieselPlayerRepository::new(db.pool.clone());

    db.runtime.block_on(async {
        let roster = [
            player("Late tie", 40, 30),
            player("Leader", 90, 20),
            player("Early tie", 40, 10),
            player("Last", 5, 0),
        ];
        for entry in &roster {
            players.insert(entry).await.expect("insert");
        }

        let top = players.list_top(3).await.expect("list");

        let names: Vec<&str> = top.iter().map(|p| p.name().as_ref()).collect();
        assert_eq!(names, ["Leader", "Early tie", "Late tie"]);
    });
}
