/*
 *  idp-core - Multi-tenant OpenID Connect identity provider
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use clap::Parser;
use idp_core::api::pages::FileLoginPageRenderer;
use idp_core::api::state::AppState;
use idp_core::config::{Config, DbType};
use idp_core::token::JwksCache;
use idp_core::{api, seed, storage};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
struct Args {
    #[arg(long, default_value = "./config.yaml")]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> idp_core::error::Result<()> {
    let config = Config::load(&args.config)?;

    let store = match &config.db.db_type {
        DbType::Memory => storage::memory::new_store(),
        DbType::Document => {
            let connection_string = config
                .db
                .connection_string
                .as_deref()
                .ok_or_else(|| idp_core::error::Error::server("db.connection-string is required for the document driver"))?;
            storage::document::new_store(connection_string).await?
        }
    };

    seed::seed_master_project(&store, &config).await?;

    let state = Arc::new(AppState {
        store,
        login_session_expires_in: config.login_session_expires_in,
        sso_expires_in: config.sso_expires_in,
        jwks_cache: JwksCache::default(),
        pages: Box::new(FileLoginPageRenderer::new(config.user_login_page_res.clone())),
    });

    api::run_server(config, state).await.map_err(idp_core::error::Error::from)
}
