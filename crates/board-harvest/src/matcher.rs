// Copyright 2026 Board Harvest Contributors
// SPDX-License-Identifier: Apache-2.0

//! Client for the resume-matching endpoint.
//!
//! Sends the resume and every harvested detail file in one multipart request
//! and stores the JSON answer next to the other outputs.

use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

use crate::config::MatchConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::persist::{list_detail_files, write_json};

/// Multipart field carrying the resume.
pub const RESUME_FIELD: &str = "resume";

/// Multipart field carrying each detail file.
pub const JOB_FIELD: &str = "job";

/// What the endpoint said about an upload.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub status: u16,
    pub jobs_sent: usize,
    pub body: serde_json::Value,
    pub output_path: PathBuf,
}

/// Upload the resume and detail files, then persist the JSON response.
pub async fn upload(config: &MatchConfig) -> HarvestResult<MatchReport> {
    let endpoint = Url::parse(&config.endpoint)?;
    let jobs = list_detail_files(&config.jobs_dir)?;

    let resume = Part::bytes(read(&config.resume_path).await?)
        .file_name(file_name(&config.resume_path))
        .mime_str("application/pdf")?;
    let mut form = Form::new().part(RESUME_FIELD, resume);
    for path in &jobs {
        let part = Part::bytes(read(path).await?)
            .file_name(file_name(path))
            .mime_str("text/plain")?;
        form = form.part(JOB_FIELD, part);
    }

    info!(endpoint = %endpoint, jobs = jobs.len(), "uploading to match endpoint");
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    let response = client.post(endpoint).multipart(form).send().await?;
    let status = response.status().as_u16();
    info!(status, "match endpoint responded");

    let text = response.text().await?;
    let body: serde_json::Value =
        serde_json::from_str(&text).map_err(|_| HarvestError::NonJsonResponse { status })?;
    write_json(&config.output_path, &body)?;

    Ok(MatchReport {
        status,
        jobs_sent: jobs.len(),
        body,
        output_path: config.output_path.clone(),
    })
}

async fn read(path: &Path) -> HarvestResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| HarvestError::file(path, e))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
