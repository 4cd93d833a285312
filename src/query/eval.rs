/*
 * tmsu
 * Copyright (C) 2026 The tmsu authors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Compiles a parsed expression into one SQL statement.  Each tag becomes a
//! UNION of its explicit and implicit taggings; AND / OR / NOT become
//! INTERSECT / UNION / EXCEPT over those sets, with every operand wrapped
//! in a FROM subquery so the compound operators associate as written.
//! Unknown tag names compile to the empty set rather than an error.

use super::Expr;
use crate::common::err::TmsuResult;
use crate::sql;
use crate::sql::SQL_TAG;
use log::trace;
use rusqlite::Connection;
use std::collections::HashMap;

fn resolve_names(conn: &Connection, expr: &Expr) -> TmsuResult<HashMap<String, Option<i64>>> {
    let mut ids = HashMap::new();
    for name in expr.tag_names() {
        let id = sql::tags::tag_by_name(conn, &name)?.map(|tag| tag.id);
        ids.insert(name, id);
    }
    Ok(ids)
}

/// The tag names in the expression that don't exist in the store.
pub fn unknown_tag_names(conn: &Connection, expr: &Expr) -> TmsuResult<Vec<String>> {
    Ok(resolve_names(conn, expr)?
        .into_iter()
        .filter_map(|(name, id)| if id.is_none() { Some(name) } else { None })
        .collect())
}

fn compile(expr: &Expr, ids: &HashMap<String, Option<i64>>, params: &mut Vec<i64>) -> String {
    match expr {
        Expr::Tag(name) => match ids.get(name).copied().flatten() {
            Some(id) => {
                params.push(id);
                let explicit = params.len();
                params.push(id);
                let implicit = params.len();
                format!(
                    "SELECT file_id FROM file_tag WHERE tag_id=?{} \
                     UNION SELECT file_id FROM implicit_file_tag WHERE tag_id=?{}",
                    explicit, implicit
                )
            }
            None => "SELECT id FROM file WHERE 1=0".to_string(),
        },
        Expr::And(a, b) => format!(
            "SELECT * FROM ({}) INTERSECT SELECT * FROM ({})",
            compile(a, ids, params),
            compile(b, ids, params)
        ),
        Expr::Or(a, b) => format!(
            "SELECT * FROM ({}) UNION SELECT * FROM ({})",
            compile(a, ids, params),
            compile(b, ids, params)
        ),
        Expr::Not(a) => format!(
            "SELECT id FROM file EXCEPT SELECT * FROM ({})",
            compile(a, ids, params)
        ),
    }
}

/// Evaluates the expression to the matching file ids, ascending.
pub fn file_ids_matching(conn: &Connection, expr: &Expr) -> TmsuResult<Vec<i64>> {
    let ids = resolve_names(conn, expr)?;
    let mut params: Vec<i64> = vec![];
    let compiled = compile(expr, &ids, &mut params);
    let query = format!("SELECT * FROM ({}) ORDER BY 1", compiled);
    trace!(target: SQL_TAG, "{}", query);

    let matched = conn
        .prepare(&query)?
        .query_map(params, |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    Ok(matched)
}
