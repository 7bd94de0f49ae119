use sqlx::PgPool;

use crate::domain::job::{Job, JobPatch, JobRow};

/// Insert one scrape run's records in a single transaction; a failure on any
/// row rolls the whole batch back.
pub async fn insert_jobs(jobs: &[Job], pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut transaction = pool.begin().await?;

    for job in jobs {
        sqlx::query(
            r#"
            insert into jobs
                (title, company_name, work_type, location, salary, benefit, listing_date, tag)
            values
                ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&job.title)
        .bind(&job.company_name)
        .bind(&job.work_type)
        .bind(&job.location)
        .bind(&job.salary)
        .bind(&job.benefit)
        .bind(&job.listing_date)
        .bind(&job.tag)
        .execute(&mut *transaction)
        .await?;
    }

    transaction.commit().await?;
    Ok(())
}

pub async fn insert_job(job: &Job, pool: &PgPool) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        insert into jobs
            (title, company_name, work_type, location, salary, benefit, listing_date, tag)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8)
        returning
            id, title, company_name, work_type, location, salary, benefit, listing_date, tag
        "#,
    )
    .bind(&job.title)
    .bind(&job.company_name)
    .bind(&job.work_type)
    .bind(&job.location)
    .bind(&job.salary)
    .bind(&job.benefit)
    .bind(&job.listing_date)
    .bind(&job.tag)
    .fetch_one(pool)
    .await
}

pub async fn get_job(id: i64, pool: &PgPool) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        select
            id, title, company_name, work_type, location, salary, benefit, listing_date, tag
        from
            jobs
        where
            id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_jobs(tag: Option<&str>, pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    match tag {
        Some(tag) => {
            sqlx::query_as::<_, JobRow>(
                r#"
                select
                    id, title, company_name, work_type, location, salary, benefit, listing_date, tag
                from
                    jobs
                where
                    tag = $1
                order by
                    id desc
                "#,
            )
            .bind(tag)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, JobRow>(
                r#"
                select
                    id, title, company_name, work_type, location, salary, benefit, listing_date, tag
                from
                    jobs
                order by
                    id desc
                "#,
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// Partial update: fields absent from the patch keep their stored value.
/// Returns the updated row, or `None` when no row has that id.
pub async fn update_job(
    id: i64,
    patch: &JobPatch,
    pool: &PgPool,
) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        update jobs set
            title = coalesce($2, title),
            company_name = coalesce($3, company_name),
            work_type = coalesce($4, work_type),
            location = coalesce($5, location),
            salary = coalesce($6, salary),
            benefit = coalesce($7, benefit),
            listing_date = coalesce($8, listing_date),
            tag = coalesce($9, tag)
        where
            id = $1
        returning
            id, title, company_name, work_type, location, salary, benefit, listing_date, tag
        "#,
    )
    .bind(id)
    .bind(&patch.title)
    .bind(&patch.company_name)
    .bind(&patch.work_type)
    .bind(&patch.location)
    .bind(&patch.salary)
    .bind(&patch.benefit)
    .bind(&patch.listing_date)
    .bind(&patch.tag)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was actually deleted.
pub async fn delete_job(id: i64, pool: &PgPool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("delete from jobs where id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
