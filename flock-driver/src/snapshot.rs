use flock_core::{Agent, FlockSimulation};
use flock_shared::{AgentSnapshot, FlockSnapshot, Position};

/// Copies what a renderer reads after a step: position, velocity, heading
/// and, when recorded, the trail.
pub fn capture(sim: &FlockSimulation) -> FlockSnapshot {
    FlockSnapshot {
        frame: sim.frame(),
        width: sim.width(),
        height: sim.height(),
        boids: sim.boids().iter().map(agent_snapshot).collect(),
        predators: sim.predators().iter().map(agent_snapshot).collect(),
    }
}

fn agent_snapshot(agent: &Agent) -> AgentSnapshot {
    AgentSnapshot {
        position: Position::new(agent.position.x, agent.position.y),
        velocity: Position::new(agent.velocity.x, agent.velocity.y),
        heading: agent.heading(),
        trail: agent.history().map(|p| Position::new(p.x, p.y)).collect(),
    }
}
