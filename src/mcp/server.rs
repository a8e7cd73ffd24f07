//! Nutridex MCP Server Implementation
//!
//! Implements the MCP server with all nutridex tools.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetCache, FoodTable};
use crate::session::{SessionState, SessionStore, DEFAULT_SESSION};
use crate::tools::filters::FilterStateResponse;
use crate::tools::status::StatusTracker;
use crate::tools::{browse, cart, compare, filters, rankings, status};

/// Nutridex MCP Service
#[derive(Clone)]
pub struct NutridexService {
    dataset_path: PathBuf,
    cache: Arc<DatasetCache>,
    sessions: Arc<Mutex<SessionStore>>,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<NutridexService>,
}

impl NutridexService {
    pub fn new(dataset_path: PathBuf, cache: Arc<DatasetCache>) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(dataset_path.clone())),
            dataset_path,
            cache,
            sessions: Arc::new(Mutex::new(SessionStore::new())),
            tool_router: Self::tool_router(),
        }
    }

    /// The dataset table, or a user-visible notice when it cannot load
    fn table(&self) -> Result<Arc<FoodTable>, String> {
        self.cache
            .get_or_load(&self.dataset_path)
            .map_err(|e| e.to_string())
    }

    /// Run a closure against one session's mutable state
    fn with_session<T>(&self, id: Option<&str>, f: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut store = self.sessions.lock().expect("session store poisoned");
        f(store.state(id.unwrap_or(DEFAULT_SESSION)))
    }
}

/// Serialize a tool response into the MCP text payload
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SessionParams {
    /// Session id (optional, defaults to the shared session)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetFilterParams {
    /// Filter level: major, mid, minor, or origin
    pub level: String,
    /// Value to select; "전체" or "all" disables the level
    pub value: String,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TopCaloriesParams {
    /// Major category to rank within; "전체" or "all" ranks the whole table
    #[serde(default = "default_category")]
    pub category: String,
    /// Number of foods to return (default 10)
    #[serde(default = "default_ranking_limit")]
    pub limit: usize,
}

fn default_category() -> String { crate::filter::ALL_SENTINEL.to_string() }
fn default_ranking_limit() -> usize { 10 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddToCartParams {
    /// Food names to add; already-present names are left untouched
    pub names: Vec<String>,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCartGramsParams {
    /// Food name of the cart entry
    pub name: String,
    /// New gram quantity (non-negative)
    pub grams: f64,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveFromCartParams {
    /// Food name of the cart entry
    pub name: String,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Gender: male or female
    pub gender: String,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareSlotParams {
    /// Comparison slot: 1 or 2
    pub slot: usize,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCompareFilterParams {
    /// Comparison slot: 1 or 2
    pub slot: usize,
    /// Filter level: major, mid, minor, or origin
    pub level: String,
    /// Value to select; "전체" or "all" disables the level
    pub value: String,
    /// Session id (optional)
    pub session: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompareFoodsParams {
    /// First food name
    pub first: String,
    /// Second food name
    pub second: String,
}

// ============================================================================
// Response helpers
// ============================================================================

#[derive(Debug, Serialize)]
struct ResetSessionResponse {
    success: bool,
    session: String,
}

impl FilterStateResponse {
    fn unavailable(notice: String) -> Self {
        Self {
            levels: Vec::new(),
            notice: Some(notice),
        }
    }
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutridexService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutridex service including build info, dataset status, and process information")]
    fn nutridex_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.cache);
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for browsing, ranking, cart building, and comparing foods. Call this when starting a new session or when unsure how to use the tools.")]
    fn explorer_instructions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(
            status::EXPLORER_INSTRUCTIONS,
        )]))
    }

    // --- Category browsing ---

    #[tool(description = "Show the browse filter chain: the selected value and available options for every category level (major, mid, minor, origin)")]
    fn browse_options(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self.with_session(p.session.as_deref(), |state| FilterStateResponse {
                levels: filters::chain_state(&table, &state.browse),
                notice: None,
            }),
            Err(notice) => FilterStateResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Select a value for one browse filter level. Changing a level resets every level beneath it; pass '전체' or 'all' to disable a level.")]
    fn set_browse_filter(&self, Parameters(p): Parameters<SetFilterParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self
                .with_session(p.session.as_deref(), |state| {
                    filters::set_filter(&table, &mut state.browse, &p.level, &p.value)
                })
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => FilterStateResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "List the foods under the current browse filter selection with their per-100g calories")]
    fn browse_foods(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => {
                self.with_session(p.session.as_deref(), |state| browse::browse_foods(&table, &state.browse))
            }
            Err(notice) => browse::BrowseFoodsResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    // --- Rankings ---

    #[tool(description = "Rank the highest-calorie foods within a major category (per 100g). Foods whose calorie cell is unparsable are excluded from the ranking.")]
    fn top_calories(&self, Parameters(p): Parameters<TopCaloriesParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => rankings::top_calories(&table, &p.category, p.limit),
            Err(notice) => rankings::TopCaloriesResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Average per-100g calories for every major category, sorted descending by mean")]
    fn category_averages(&self) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => rankings::category_averages(&table),
            Err(notice) => rankings::CategoryAveragesResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    // --- Cart ---

    #[tool(description = "Select a value for one cart filter level to narrow the food picker. Changing a level resets every level beneath it.")]
    fn set_cart_filter(&self, Parameters(p): Parameters<SetFilterParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self
                .with_session(p.session.as_deref(), |state| {
                    filters::set_filter(&table, &mut state.cart_filter, &p.level, &p.value)
                })
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => FilterStateResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "List the food names selectable under the current cart filter")]
    fn cart_food_options(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => {
                self.with_session(p.session.as_deref(), |state| cart::cart_food_options(&table, state))
            }
            Err(notice) => cart::FoodOptionsResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Add foods to the cart by name, 100g each by default. Adding an already-present name is a no-op; unknown names are reported, not errors.")]
    fn add_to_cart(&self, Parameters(p): Parameters<AddToCartParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self.with_session(p.session.as_deref(), |state| {
                cart::add_to_cart(&table, state, &p.names)
            }),
            Err(notice) => cart::AddToCartResponse::unavailable(&p.names, notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Replace the gram quantity of a cart entry (non-negative, no upper bound)")]
    fn set_cart_grams(&self, Parameters(p): Parameters<SetCartGramsParams>) -> Result<CallToolResult, McpError> {
        let resp = self
            .with_session(p.session.as_deref(), |state| {
                cart::set_cart_grams(state, &p.name, p.grams)
            })
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&resp)
    }

    #[tool(description = "Remove a food from the cart; removing an absent name is a no-op")]
    fn remove_from_cart(&self, Parameters(p): Parameters<RemoveFromCartParams>) -> Result<CallToolResult, McpError> {
        let resp = self.with_session(p.session.as_deref(), |state| {
            cart::remove_from_cart(state, &p.name)
        });
        json_result(&resp)
    }

    #[tool(description = "Show the cart: per-entry grams and calories plus the full nutrient totals, recomputed from scratch")]
    fn view_cart(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let resp = self.with_session(p.session.as_deref(), |state| cart::view_cart(state));
        json_result(&resp)
    }

    #[tool(description = "Set the session's body measurements (gender, height in cm, weight in kg) used by the intake analysis")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let resp = self
            .with_session(p.session.as_deref(), |state| {
                cart::set_profile(state, &p.gender, p.height_cm, p.weight_kg)
            })
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&resp)
    }

    #[tool(description = "Analyze the cart total against recommended intake: calorie verdict (requires a profile with a positive height), per-nutrient severity bands, and a high-calorie alert above 2500 kcal")]
    fn analyze_intake(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let resp = self.with_session(p.session.as_deref(), |state| cart::analyze_intake(state));
        json_result(&resp)
    }

    #[tool(description = "Reset a session to its fresh state: empty cart, sentinel filters, no profile")]
    fn reset_session(&self, Parameters(p): Parameters<SessionParams>) -> Result<CallToolResult, McpError> {
        let session = p.session.unwrap_or_else(|| DEFAULT_SESSION.to_string());
        self.sessions
            .lock()
            .expect("session store poisoned")
            .reset(&session);
        json_result(&ResetSessionResponse {
            success: true,
            session,
        })
    }

    // --- Comparison ---

    #[tool(description = "Show one comparison slot's filter chain with the available options per level")]
    fn compare_filter_options(&self, Parameters(p): Parameters<CompareSlotParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self
                .with_session(p.session.as_deref(), |state| {
                    compare::slot_selections(state, p.slot).map(|selections| FilterStateResponse {
                        levels: filters::chain_state(&table, selections),
                        notice: None,
                    })
                })
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => FilterStateResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Select a value for one filter level of a comparison slot (1 or 2). Changing a level resets every level beneath it.")]
    fn set_compare_filter(&self, Parameters(p): Parameters<SetCompareFilterParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self
                .with_session(p.session.as_deref(), |state| {
                    let selections = compare::slot_selections(state, p.slot)?;
                    filters::set_filter(&table, selections, &p.level, &p.value)
                })
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => FilterStateResponse::unavailable(notice),
        };
        json_result(&resp)
    }

    #[tool(description = "List the food names selectable under one comparison slot's filter")]
    fn compare_food_options(&self, Parameters(p): Parameters<CompareSlotParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => self
                .with_session(p.session.as_deref(), |state| {
                    compare::compare_food_options(&table, state, p.slot)
                })
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => compare::CompareOptionsResponse::unavailable(p.slot, notice),
        };
        json_result(&resp)
    }

    #[tool(description = "Compare two foods' per-100g nutrient profiles side by side (calories, carbohydrate, protein, fat, sugar, sodium, cholesterol, saturated fat, fiber)")]
    fn compare_foods(&self, Parameters(p): Parameters<CompareFoodsParams>) -> Result<CallToolResult, McpError> {
        let resp = match self.table() {
            Ok(table) => compare::compare_foods(&table, &p.first, &p.second)
                .map_err(|e| McpError::invalid_params(e, None))?,
            Err(notice) => {
                compare::CompareFoodsResponse::unavailable(p.first, p.second, notice)
            }
        };
        json_result(&resp)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutridexService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutridex".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Dataset Explorer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutridex - browse, rank, and compare foods from a per-100g nutrition dataset. \
                 IMPORTANT: Call explorer_instructions when starting a session. \
                 Browse: browse_options/set_browse_filter/browse_foods (major > mid > minor > origin cascade, '전체' disables a level). \
                 Rankings: top_calories, category_averages. \
                 Cart: set_cart_filter/cart_food_options, add_to_cart/set_cart_grams/remove_from_cart/view_cart, \
                 set_profile then analyze_intake for the recommended-intake analysis, reset_session to start over. \
                 Comparison: set_compare_filter/compare_food_options per slot (1 or 2), then compare_foods."
                    .into(),
            ),
        }
    }
}
