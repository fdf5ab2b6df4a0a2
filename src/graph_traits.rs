// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the traits that need to be implemented by the types
//! that represent a node and an edge.

use crate::{AttributeValue, NetworkType};

/**
This trait needs to be implemented by the type that represents a node.

Read more about why this is necessary [here][crate#the-node-and-edge-traits].

<details>
<summary>Example implementation for a node with an attribute dictionary:</summary>

```ignore
struct NetworkNode {
    id: u64,
    attributes: std::collections::HashMap<String, AttributeValue>,
}

impl hydronic_sizing::Node for NetworkNode {
    fn node_id(&self) -> u64 {
        self.id
    }

    fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}
```

</details>
*/
pub trait Node {
    /// Returns the id of the node.
    fn node_id(&self) -> u64;
    /// Returns the attribute stored under `name`, if any.
    fn attribute(&self, name: &str) -> Option<&AttributeValue>;
}

/**
This trait needs to be implemented by the type that represents a pipe
segment between two nodes.

Read more about why this is necessary [here][crate#the-node-and-edge-traits].

<details>
<summary>Example implementation:</summary>

```ignore
struct NetworkPipe {
    from: u64,
    to: u64,
    length: f64,
}

impl hydronic_sizing::Edge for NetworkPipe {
    fn source(&self) -> u64 {
        self.from
    }

    fn destination(&self) -> u64 {
        self.to
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn network_type(&self) -> NetworkType {
        NetworkType::Heating
    }
}
```

</details>
*/
pub trait Edge {
    /// Returns the id of the first endpoint of the pipe.
    fn source(&self) -> u64;
    /// Returns the id of the second endpoint of the pipe.
    fn destination(&self) -> u64;
    /// Returns the length of the pipe in meters.
    fn length(&self) -> f64;
    /// Returns the network the pipe belongs to.
    fn network_type(&self) -> NetworkType;
}
