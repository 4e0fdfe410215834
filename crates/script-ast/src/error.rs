// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum AstError {
    #[error("Node {0:?} does not belong to this source unit")]
    UnknownNode(NodeId),

    #[error("Node {0:?} ({1}) has no initializer slot")]
    NoInitializerSlot(NodeId, &'static str),

    #[error("The initializer slot of node {0:?} is already occupied")]
    SlotOccupied(NodeId),
}
