use std::collections::BTreeSet;

use diesel::connection::TransactionManager;
use diesel::mysql::{Mysql, MysqlConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_query;
use diesel::sql_types::{Bigint, Date, Nullable, Text, Unsigned};

use super::schema::{localities, stops};
use super::store::{
    NewJourneyPattern, NewJourneyPatternLink, NewService, NewVehicleJourney, ReferenceStore, RowId, TrackPoint,
};
use super::types::Data_source;
use super::StoreError;

no_arg_sql_function!(last_insert_id, Unsigned<Bigint>, "MySQL LAST_INSERT_ID()");

/// Foreign key of `services.nocCode` onto `operators.nocCode`, as it shows up
/// in MySQL's error message.
const NOC_FOREIGN_KEY: &str = "FOREIGN KEY (`nocCode`)";

/// Rows per multi-row `INSERT`, well below MySQL's 65535 placeholder limit.
const INSERT_CHUNK: usize = 500;

#[derive(Debug, QueryableByName)]
struct IdRow {
    #[sql_type = "Unsigned<Bigint>"]
    id: u64,
}

/// `ReferenceStore` on a MySQL connection. All writes go to the writer tables
/// named `<table><suffix>`; the existence checks use MySQL's null-safe `<=>`.
pub struct MysqlStore {
    conn: MysqlConnection,
    suffix: String,
}

impl MysqlStore {
    pub fn new(conn: MysqlConnection, suffix: impl Into<String>) -> Self {
        MysqlStore { conn, suffix: suffix.into() }
    }

    fn table(&self, name: &str) -> String {
        format!("{}{}", name, self.suffix)
    }

    fn last_insert_id(&self) -> Result<RowId, StoreError> {
        diesel::select(last_insert_id).first::<u64>(&self.conn).map_err(StoreError::classify_query)
    }
}

/// `(?, ?), (?, ?)` for `rows` rows of `columns` values each.
fn placeholders(columns: usize, rows: usize) -> String {
    let row = format!("({})", vec!["?"; columns].join(", "));
    vec![row; rows].join(", ")
}

fn is_noc_violation(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => true,
        DieselError::DatabaseError(_, info) => info.message().contains(NOC_FOREIGN_KEY),
        _ => false,
    }
}

impl ReferenceStore for MysqlStore {
    fn begin(&mut self) -> Result<(), StoreError> {
        self.conn.transaction_manager().begin_transaction(&self.conn).map_err(StoreError::classify_query)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.conn.transaction_manager().commit_transaction(&self.conn).map_err(StoreError::classify_query)
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        self.conn.transaction_manager().rollback_transaction(&self.conn).map_err(StoreError::classify_query)
    }

    fn find_service(&mut self, service: &NewService) -> Result<Option<RowId>, StoreError> {
        let query = format!(
            "SELECT CAST(id AS UNSIGNED) AS id FROM {} WHERE nocCode <=> ? AND lineName <=> ? AND serviceCode <=> ? \
             AND startDate <=> ? AND endDate <=> ? AND dataSource <=> ? LIMIT 1",
            self.table("services")
        );

        let rows = sql_query(query)
            .bind::<Nullable<Text>, _>(service.noc_code.as_deref())
            .bind::<Text, _>(service.line_name.as_str())
            .bind::<Nullable<Text>, _>(service.service_code.as_deref())
            .bind::<Nullable<Date>, _>(service.start_date)
            .bind::<Nullable<Date>, _>(service.end_date)
            .bind::<Data_source, _>(service.data_source)
            .load::<IdRow>(&self.conn)
            .map_err(StoreError::classify_query)?;

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    fn insert_service(&mut self, service: &NewService) -> Result<RowId, StoreError> {
        let query = format!(
            "INSERT INTO {} (nocCode, lineName, lineId, startDate, endDate, operatorShortName, \
             inboundDirectionDescription, outboundDirectionDescription, serviceDescription, serviceCode, \
             regionCode, dataSource, origin, destination, mode, filePath) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            self.table("services")
        );

        let result = sql_query(query)
            .bind::<Nullable<Text>, _>(service.noc_code.as_deref())
            .bind::<Text, _>(service.line_name.as_str())
            .bind::<Text, _>(service.line_id.as_str())
            .bind::<Nullable<Date>, _>(service.start_date)
            .bind::<Nullable<Date>, _>(service.end_date)
            .bind::<Nullable<Text>, _>(service.operator_short_name.as_deref())
            .bind::<Text, _>(service.inbound_direction_description.as_str())
            .bind::<Text, _>(service.outbound_direction_description.as_str())
            .bind::<Text, _>(service.service_description.as_str())
            .bind::<Nullable<Text>, _>(service.service_code.as_deref())
            .bind::<Nullable<Text>, _>(service.region_code.as_deref())
            .bind::<Data_source, _>(service.data_source)
            .bind::<Nullable<Text>, _>(service.origin.as_deref())
            .bind::<Nullable<Text>, _>(service.destination.as_deref())
            .bind::<Text, _>(service.mode.as_str())
            .bind::<Nullable<Text>, _>(service.file_path.as_deref())
            .execute(&self.conn);

        match result {
            Ok(_) => self.last_insert_id(),
            Err(ref err) if is_noc_violation(err) => Err(StoreError::InvalidNoc {
                noc: service.noc_code.clone().unwrap_or_default(),
            }),
            Err(err) => Err(StoreError::classify_query(err)),
        }
    }

    fn update_centre_point(&mut self, service_id: RowId, centre: &TrackPoint) -> Result<(), StoreError> {
        let query = format!("UPDATE {} SET centrePointLon = ?, centrePointLat = ? WHERE id = ?", self.table("services"));

        sql_query(query)
            .bind::<Text, _>(centre.longitude.as_str())
            .bind::<Text, _>(centre.latitude.as_str())
            .bind::<Unsigned<Bigint>, _>(service_id)
            .execute(&self.conn)
            .map_err(StoreError::classify_query)?;

        Ok(())
    }

    fn find_journey_pattern(&mut self, pattern: &NewJourneyPattern) -> Result<Option<RowId>, StoreError> {
        let query = format!(
            "SELECT CAST(id AS UNSIGNED) AS id FROM {} WHERE operatorServiceId <=> ? AND destinationDisplay <=> ? AND direction <=> ? \
             AND routeRef <=> ? AND sectionRefs <=> ? LIMIT 1",
            self.table("service_journey_patterns")
        );

        let rows = sql_query(query)
            .bind::<Unsigned<Bigint>, _>(pattern.operator_service_id)
            .bind::<Nullable<Text>, _>(pattern.destination_display.as_deref())
            .bind::<Nullable<Text>, _>(pattern.direction.as_deref())
            .bind::<Nullable<Text>, _>(pattern.route_ref.as_deref())
            .bind::<Text, _>(pattern.section_refs.as_str())
            .load::<IdRow>(&self.conn)
            .map_err(StoreError::classify_query)?;

        Ok(rows.into_iter().next().map(|row| row.id))
    }

    fn insert_journey_pattern(&mut self, pattern: &NewJourneyPattern) -> Result<RowId, StoreError> {
        let query = format!(
            "INSERT INTO {} (operatorServiceId, destinationDisplay, direction, routeRef, journeyPatternRef, sectionRefs) \
             VALUES (?, ?, ?, ?, ?, ?)",
            self.table("service_journey_patterns")
        );

        sql_query(query)
            .bind::<Unsigned<Bigint>, _>(pattern.operator_service_id)
            .bind::<Nullable<Text>, _>(pattern.destination_display.as_deref())
            .bind::<Nullable<Text>, _>(pattern.direction.as_deref())
            .bind::<Nullable<Text>, _>(pattern.route_ref.as_deref())
            .bind::<Nullable<Text>, _>(pattern.journey_pattern_ref.as_deref())
            .bind::<Text, _>(pattern.section_refs.as_str())
            .execute(&self.conn)
            .map_err(StoreError::classify_query)?;

        self.last_insert_id()
    }

    fn insert_journey_pattern_links(&mut self, journey_pattern_id: RowId, links: &[NewJourneyPatternLink]) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (journeyPatternId, fromAtcoCode, fromTimingStatus, fromSequenceNumber, toAtcoCode, \
             toTimingStatus, toSequenceNumber, runtime, routeLinkRef, orderInSequence) VALUES ",
            self.table("service_journey_pattern_links")
        );

        for chunk in links.chunks(INSERT_CHUNK) {
            let insert = sql_query(format!("{}{}", query, placeholders(10, chunk.len()))).into_boxed::<Mysql>();
            chunk.iter()
                .fold(insert, |insert, link| insert
                    .bind::<Unsigned<Bigint>, _>(journey_pattern_id)
                    .bind::<Text, _>(link.from_atco_code.as_str())
                    .bind::<Nullable<Text>, _>(link.from_timing_status.as_deref())
                    .bind::<Nullable<Text>, _>(link.from_sequence_number.as_deref())
                    .bind::<Text, _>(link.to_atco_code.as_str())
                    .bind::<Nullable<Text>, _>(link.to_timing_status.as_deref())
                    .bind::<Nullable<Text>, _>(link.to_sequence_number.as_deref())
                    .bind::<Nullable<Text>, _>(link.run_time.as_deref())
                    .bind::<Nullable<Text>, _>(link.route_link_ref.as_deref())
                    .bind::<Unsigned<Bigint>, _>(u64::from(link.order_in_sequence)))
                .execute(&self.conn)
                .map_err(StoreError::classify_query)?;
        }

        Ok(())
    }

    fn admin_area_codes(&mut self, stop_codes: &BTreeSet<String>) -> Result<BTreeSet<String>, StoreError> {
        if stop_codes.is_empty() {
            return Ok(BTreeSet::new());
        }

        let codes = stops::table
            .inner_join(localities::table.on(localities::nptg_locality_code.eq(stops::nptg_locality_code)))
            .filter(stops::atco_code.eq_any(stop_codes.iter().cloned().collect::<Vec<String>>()))
            .select(localities::administrative_area_code)
            .distinct()
            .load::<String>(&self.conn)
            .map_err(StoreError::classify_query)?;

        Ok(codes.into_iter().collect())
    }

    fn insert_admin_area_codes(&mut self, service_id: RowId, codes: &BTreeSet<String>) -> Result<(), StoreError> {
        let query = format!(
            "INSERT IGNORE INTO {} (serviceId, adminAreaCode) VALUES ",
            self.table("service_admin_area_codes")
        );

        let codes: Vec<&String> = codes.iter().collect();
        for chunk in codes.chunks(INSERT_CHUNK) {
            let insert = sql_query(format!("{}{}", query, placeholders(2, chunk.len()))).into_boxed::<Mysql>();
            chunk.iter()
                .fold(insert, |insert, code| insert
                    .bind::<Unsigned<Bigint>, _>(service_id)
                    .bind::<Text, _>(code.as_str()))
                .execute(&self.conn)
                .map_err(StoreError::classify_query)?;
        }

        Ok(())
    }

    fn insert_vehicle_journeys(&mut self, journeys: &[NewVehicleJourney]) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (vehicleJourneyCode, serviceRef, lineRef, journeyPatternRef, departureTime, journeyCode, operatorServiceId) \
             VALUES ",
            self.table("vehicle_journeys")
        );

        for chunk in journeys.chunks(INSERT_CHUNK) {
            let insert = sql_query(format!("{}{}", query, placeholders(7, chunk.len()))).into_boxed::<Mysql>();
            chunk.iter()
                .fold(insert, |insert, journey| insert
                    .bind::<Nullable<Text>, _>(journey.vehicle_journey_code.as_deref())
                    .bind::<Nullable<Text>, _>(journey.service_ref.as_deref())
                    .bind::<Nullable<Text>, _>(journey.line_ref.as_deref())
                    .bind::<Text, _>(journey.journey_pattern_ref.as_str())
                    .bind::<Nullable<Text>, _>(journey.departure_time.as_deref())
                    .bind::<Nullable<Text>, _>(journey.journey_code.as_deref())
                    .bind::<Unsigned<Bigint>, _>(journey.operator_service_id))
                .execute(&self.conn)
                .map_err(StoreError::classify_query)?;
        }

        Ok(())
    }

    fn stop_location(&mut self, atco_code: &str) -> Result<Option<TrackPoint>, StoreError> {
        let location = stops::table
            .filter(stops::atco_code.eq(atco_code))
            .select((stops::longitude, stops::latitude))
            .first::<(Option<String>, Option<String>)>(&self.conn)
            .optional()
            .map_err(StoreError::classify_query)?;

        Ok(match location {
            Some((Some(longitude), Some(latitude))) => Some(TrackPoint { longitude, latitude }),
            _ => None,
        })
    }

    fn insert_track(&mut self, service_id: RowId, points: &[TrackPoint]) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (operatorServiceId, longitude, latitude) VALUES ",
            self.table("tracks")
        );

        for chunk in points.chunks(INSERT_CHUNK) {
            let insert = sql_query(format!("{}{}", query, placeholders(3, chunk.len()))).into_boxed::<Mysql>();
            chunk.iter()
                .fold(insert, |insert, point| insert
                    .bind::<Unsigned<Bigint>, _>(service_id)
                    .bind::<Text, _>(point.longitude.as_str())
                    .bind::<Text, _>(point.latitude.as_str()))
                .execute(&self.conn)
                .map_err(StoreError::classify_query)?;
        }

        Ok(())
    }
}
