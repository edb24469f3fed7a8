use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::Result;
use crate::models::job_role::JobRole;
use sqlx::PgPool;
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, department, description, location, work_type, \
    salary_min, salary_max, currency, experience_min, experience_max, \
    non_negotiable_skills, preferred_skills, openings_count, is_active, \
    posted_at, closes_at, created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<JobRole> {
        let sql = format!(
            r#"
            INSERT INTO job_roles (
                title, department, description, location, work_type,
                salary_min, salary_max, currency, experience_min, experience_max,
                non_negotiable_skills, preferred_skills, openings_count,
                is_active, posted_at, closes_at
            ) VALUES (
                $1,$2,$3,$4,$5,
                $6,$7,$8,$9,$10,
                $11,$12,$13,
                TRUE,COALESCE($14, NOW()),$15
            )
            RETURNING {JOB_COLUMNS}
            "#
        );
        let job = sqlx::query_as::<_, JobRole>(&sql)
            .bind(payload.title)
            .bind(payload.department)
            .bind(payload.description)
            .bind(payload.location)
            .bind(payload.work_type)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.currency)
            .bind(payload.experience_min)
            .bind(payload.experience_max)
            .bind(payload.non_negotiable_skills)
            .bind(payload.preferred_skills)
            .bind(payload.openings_count.unwrap_or(1))
            .bind(payload.posted_at)
            .bind(payload.closes_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<JobRole> {
        self.get_by_id(id).await?;

        let sql = format!(
            r#"
            UPDATE job_roles
            SET
                title = COALESCE($2, title),
                department = COALESCE($3, department),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                work_type = COALESCE($6, work_type),
                salary_min = COALESCE($7, salary_min),
                salary_max = COALESCE($8, salary_max),
                currency = COALESCE($9, currency),
                experience_min = COALESCE($10, experience_min),
                experience_max = COALESCE($11, experience_max),
                non_negotiable_skills = COALESCE($12, non_negotiable_skills),
                preferred_skills = COALESCE($13, preferred_skills),
                openings_count = COALESCE($14, openings_count),
                is_active = COALESCE($15, is_active),
                posted_at = COALESCE($16, posted_at),
                closes_at = COALESCE($17, closes_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        );
        let job = sqlx::query_as::<_, JobRole>(&sql)
            .bind(id)
            .bind(payload.title)
            .bind(payload.department)
            .bind(payload.description)
            .bind(payload.location)
            .bind(payload.work_type)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.currency)
            .bind(payload.experience_min)
            .bind(payload.experience_max)
            .bind(payload.non_negotiable_skills)
            .bind(payload.preferred_skills)
            .bind(payload.openings_count)
            .bind(payload.is_active)
            .bind(payload.posted_at)
            .bind(payload.closes_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(job)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<Vec<JobRole>> {
        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if query.active_only.unwrap_or(true) {
            filters.push("is_active = TRUE".to_string());
        }
        if let Some(department) = query.department {
            filters.push(format!("department = ${}", args.len() + 1));
            args.push(department);
        }
        if let Some(work_type) = query.work_type {
            filters.push(format!("work_type = ${}", args.len() + 1));
            args.push(work_type);
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM job_roles {} ORDER BY COALESCE(posted_at, created_at) DESC",
            where_clause
        );

        let mut statement = sqlx::query_as::<_, JobRole>(&sql);
        for value in &args {
            statement = statement.bind(value);
        }
        let jobs = statement.fetch_all(&self.pool).await?;

        Ok(jobs)
    }

    pub async fn list_active(&self) -> Result<Vec<JobRole>> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM job_roles WHERE is_active = TRUE ORDER BY COALESCE(posted_at, created_at) DESC"
        );
        let jobs = sqlx::query_as::<_, JobRole>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobRole> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM job_roles WHERE id = $1");
        let job = sqlx::query_as::<_, JobRole>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    /// Roles are deactivated, never hard-deleted.
    pub async fn deactivate(&self, id: Uuid) -> Result<JobRole> {
        let sql = format!(
            "UPDATE job_roles SET is_active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING {JOB_COLUMNS}"
        );
        let job = sqlx::query_as::<_, JobRole>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }
}
