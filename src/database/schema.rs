// Read-only reference tables, loaded by the NaPTAN/NPTG uploaders. The writer
// tables carry a configurable suffix and are addressed through raw SQL in
// `mysql.rs` instead.

table! {
    use diesel::sql_types::*;

    stops (id) {
        id -> Integer,
        #[sql_name = "atcoCode"]
        atco_code -> Nullable<Varchar>,
        #[sql_name = "nptgLocalityCode"]
        nptg_locality_code -> Nullable<Varchar>,
        longitude -> Nullable<Varchar>,
        latitude -> Nullable<Varchar>,
    }
}

table! {
    use diesel::sql_types::*;

    localities (id) {
        id -> Integer,
        #[sql_name = "nptgLocalityCode"]
        nptg_locality_code -> Nullable<Varchar>,
        #[sql_name = "administrativeAreaCode"]
        administrative_area_code -> Varchar,
    }
}

allow_tables_to_appear_in_same_query!(
    localities,
    stops,
);
