use scrud_core::enums::EntityType;
use scrud_core::errors::CoreError;
use scrud_db::error::StoreError;

/// Name the missing record when a single-row lookup comes back empty.
pub fn found<T>(result: Result<T, StoreError>, entity: EntityType, id: &str) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(StoreError::NoResult) => Err(CoreError::NotFound {
            entity_type: entity.to_string(),
            id: id.to_string(),
        }
        .into()),
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use scrud_core::enums::EntityType;
    use scrud_db::error::StoreError;

    use super::found;

    #[test]
    fn no_result_names_entity_and_id() {
        let err = found::<()>(Err(StoreError::NoResult), EntityType::Course, "crs-00000001")
            .expect_err("should map");
        assert_eq!(err.to_string(), "Entity not found: course crs-00000001");
    }

    #[test]
    fn other_errors_pass_through() {
        let err = found::<()>(
            Err(StoreError::InvalidScore(-1.0)),
            EntityType::Enrollment,
            "stu-1",
        )
        .expect_err("should pass through");
        assert!(err.to_string().contains("Invalid score"));
    }
}
